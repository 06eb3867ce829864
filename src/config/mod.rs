use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::dnd::CollisionDetection;

/// Global configuration (stored in ~/.config/taskboard/)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Log filter used when TASKBOARD_LOG is not set (e.g. "info", "taskboard=debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Drag-and-drop behaviour
    #[serde(default)]
    pub drag: DragConfig,

    /// UI theme/colors
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            drag: DragConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Drag-and-drop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragConfig {
    /// Cells the pointer must travel before a press becomes a drag
    #[serde(default = "default_activation_distance")]
    pub activation_distance: u16,

    /// How the drop target is picked
    #[serde(default)]
    pub collision: CollisionDetection,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            activation_distance: default_activation_distance(),
            collision: CollisionDetection::default(),
        }
    }
}

fn default_activation_distance() -> u16 {
    1
}

/// Theme configuration with hex colors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Border color for the selected card/column (hex, e.g. "#FFFF00")
    #[serde(default = "default_color_selected")]
    pub color_selected: String,

    /// Border color for normal elements (hex, e.g. "#00FFFF")
    #[serde(default = "default_color_normal")]
    pub color_normal: String,

    /// Color for the card left behind while it is dragged
    #[serde(default = "default_color_dimmed")]
    pub color_dimmed: String,

    /// Text color for task titles
    #[serde(default = "default_color_text")]
    pub color_text: String,

    /// Color for column headers when not selected
    #[serde(default = "default_color_column_header")]
    pub color_column_header: String,

    /// Border color of the current drop target
    #[serde(default = "default_color_drop_target")]
    pub color_drop_target: String,

    /// Color of the delete glyph
    #[serde(default = "default_color_delete")]
    pub color_delete: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            color_selected: default_color_selected(),
            color_normal: default_color_normal(),
            color_dimmed: default_color_dimmed(),
            color_text: default_color_text(),
            color_column_header: default_color_column_header(),
            color_drop_target: default_color_drop_target(),
            color_delete: default_color_delete(),
        }
    }
}

fn default_color_selected() -> String {
    "#ead49a".to_string() // Yellow
}

fn default_color_normal() -> String {
    "#5cfff7".to_string() // Cyan
}

fn default_color_dimmed() -> String {
    "#9C9991".to_string() // Dark Gray
}

fn default_color_text() -> String {
    "#f2ece6".to_string() // Light Rose
}

fn default_color_column_header() -> String {
    "#a0d2fa".to_string() // Light Blue Gray
}

fn default_color_drop_target() -> String {
    "#9ffc9f".to_string() // Light Green
}

fn default_color_delete() -> String {
    "#ff8080".to_string() // Salmon
}

impl ThemeConfig {
    /// Parse a hex color string to RGB tuple
    pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
}

impl GlobalConfig {
    /// Load global config from default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from a file; a missing file yields the defaults
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config {:?}", config_path))
        } else {
            Ok(Self::default())
        }
    }

    /// Save global config to default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;

        Ok(())
    }

    /// Get the path to the global config file
    /// Always uses ~/.config/taskboard/ on all platforms
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").context("Could not determine home directory")?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("taskboard")
            .join("config.toml"))
    }

    /// Get the path to the global data directory (log files)
    pub fn data_dir() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "taskboard")
            .context("Could not determine data directory")?;
        Ok(dirs.data_dir().to_path_buf())
    }
}
