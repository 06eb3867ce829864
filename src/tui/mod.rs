mod app;
pub mod board;
mod input;
pub mod terminal;
pub mod widgets;

pub use app::App;
