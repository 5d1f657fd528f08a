use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::pipeline::rank::MAX_COLORS;
use crate::pipeline::swatch::{DEFAULT_SWATCH_HEIGHT, DEFAULT_SWATCH_WIDTH};
use crate::template::Placeholders;

/// Prefix of every environment override.
pub const ENV_PREFIX: &str = "HYPRHUE_";

/// Everything a run needs, after defaults, the settings file and
/// environment overrides are layered together.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub wallpaper_dir: PathBuf,
    pub template: PathBuf,
    pub generated: PathBuf,
    pub user_config: PathBuf,
    pub backup: PathBuf,
    pub swatch: PathBuf,
    pub colors: usize,
    pub swatch_width: u32,
    pub swatch_height: u32,
    pub placeholders: Placeholders,
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"))
}

fn config_home() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| home_dir().join(".config"))
}

impl Default for Settings {
    fn default() -> Self {
        let config = config_home();
        let pictures = dirs::picture_dir().unwrap_or_else(|| home_dir().join("Pictures"));
        Self {
            wallpaper_dir: pictures.join("wallpapers"),
            template: config.join("wallpaper").join("hyprland.conf.template"),
            generated: config.join("wallpaper").join("hyprland.conf.gen"),
            user_config: config.join("hypr").join("hyprland.conf"),
            backup: config.join("hypr").join("hyprland.user.bak"),
            swatch: config.join("wallpaper").join("palette.png"),
            colors: MAX_COLORS,
            swatch_width: DEFAULT_SWATCH_WIDTH,
            swatch_height: DEFAULT_SWATCH_HEIGHT,
            placeholders: Placeholders::default(),
        }
    }
}

/// `$XDG_CONFIG_HOME/hyprhue/config.toml`
pub fn default_settings_path() -> PathBuf {
    config_home().join("hyprhue").join("config.toml")
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home_dir().join(rest),
        Err(_) => path.to_path_buf(),
    }
}

impl Settings {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self> {
        let settings: Settings = toml::from_str(text).map_err(|source| Error::SettingsParse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(settings.expanded())
    }

    /// Load the settings file.
    ///
    /// An explicitly given file must exist. The default location is optional
    /// and falls back to built-in defaults when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (path, required) = match explicit {
            Some(path) => (expand_home(path), true),
            None => (default_settings_path(), false),
        };

        if !required && !path.exists() {
            debug!("no settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path).map_err(|source| Error::SettingsRead {
            path: path.clone(),
            source,
        })?;
        info!("loaded settings: {}", path.display());
        Self::from_toml(&text, &path)
    }

    /// Apply `HYPRHUE_*` overrides looked up through `var`.
    pub fn apply_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| var(&format!("{ENV_PREFIX}{key}")).filter(|v| !v.is_empty());

        for (key, slot) in [
            ("WALLPAPER_DIR", &mut self.wallpaper_dir),
            ("TEMPLATE", &mut self.template),
            ("OUTPUT", &mut self.generated),
            ("USER_CONFIG", &mut self.user_config),
            ("BACKUP", &mut self.backup),
            ("SWATCH", &mut self.swatch),
        ] {
            if let Some(value) = lookup(key) {
                *slot = expand_home(Path::new(&value));
            }
        }

        if let Some(value) = lookup("COLORS") {
            self.colors = value.parse().map_err(|e| {
                Error::InvalidSettings(format!("{ENV_PREFIX}COLORS={value}: {e}"))
            })?;
        }
        Ok(())
    }

    fn expanded(mut self) -> Self {
        for path in [
            &mut self.wallpaper_dir,
            &mut self.template,
            &mut self.generated,
            &mut self.user_config,
            &mut self.backup,
            &mut self.swatch,
        ] {
            *path = expand_home(path);
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_COLORS).contains(&self.colors) {
            return Err(Error::InvalidSettings(format!(
                "colors must be between 1 and {MAX_COLORS}, got {}",
                self.colors
            )));
        }
        if self.swatch_width == 0 || (self.swatch_height as usize) < self.colors {
            return Err(Error::InvalidSettings(format!(
                "a {}x{} swatch cannot hold {} bands",
                self.swatch_width, self.swatch_height, self.colors
            )));
        }
        let tokens = &self.placeholders;
        if tokens.color.is_empty() || tokens.wallpaper_path.is_empty() {
            return Err(Error::InvalidSettings(
                "placeholder tokens must not be empty".to_string(),
            ));
        }
        if tokens.color == tokens.wallpaper_path {
            return Err(Error::InvalidSettings(format!(
                "color and wallpaper placeholders are both '{}'",
                tokens.color
            )));
        }
        Ok(())
    }
}
