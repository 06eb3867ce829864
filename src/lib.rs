pub mod board;
pub mod config;
pub mod dnd;
pub mod ids;
pub mod logging;
pub mod tui;
