use std::path::PathBuf;

use thiserror::Error;

/// Every way a run can fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read wallpaper directory {}: {source}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no wallpaper images (png, jpg, jpeg) found in {}", .0.display())]
    NoWallpapers(PathBuf),

    #[error("unsupported or corrupt image {}: {source}", .path.display())]
    ImageDecode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("image has {found} distinct colors, {required} required")]
    InsufficientColors { required: usize, found: usize },

    #[error("template not found: {}", .path.display())]
    TemplateNotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read template {}: {source}", .path.display())]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("template line {line} asks for a color but only {available} were generated")]
    TemplateExhausted { line: usize, available: usize },

    #[error("failed to read user config {}: {source}", .path.display())]
    UserConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write palette swatch {}: {source}", .path.display())]
    SwatchWrite {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("cannot split a {width}x{height} swatch into {bands} bands")]
    InvalidSwatch { width: u32, height: u32, bands: usize },

    #[error("failed to read settings {}: {source}", .path.display())]
    SettingsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid settings file {}: {source}", .path.display())]
    SettingsParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, Error>;
