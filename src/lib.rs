//! Pick a random wallpaper, rank its most frequent colors and feed them into
//! a Hyprland config template.

pub mod app;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod merge;
pub mod pipeline;
pub mod preview;
pub mod template;

pub use error::{Error, Result};
