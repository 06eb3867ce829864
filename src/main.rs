use anyhow::{bail, Result};
use std::path::PathBuf;
use taskboard::{config::GlobalConfig, logging, tui};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1).map(|s| s.as_str()) {
        Some("-V") | Some("--version") => {
            println!("taskboard {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Some("-c") | Some("--config") => match args.get(2) {
            Some(path) => Some(PathBuf::from(path)),
            None => bail!("--config requires a path"),
        },
        Some(other) => bail!("Unknown argument: {}\nUsage: taskboard [--config <path>] [--version]", other),
        None => None,
    };

    let config = match &config_path {
        Some(path) => GlobalConfig::load_from(path)?,
        None => GlobalConfig::load()?,
    };

    let _log_guard = logging::init(&GlobalConfig::data_dir()?, &config.log_level)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting taskboard");

    tui::terminal::install_panic_hook();

    // Initialize and run the app
    let mut app = tui::App::new(&config)?;
    app.run().await?;

    tracing::info!("taskboard exited");
    Ok(())
}
