use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::{Error, Result};

/// Variable the wallpaper path is assigned to in the generated config.
pub const WALLPAPER_VARIABLE: &str = "wallpaper_path";

/// Full-line tokens recognized in a template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Placeholders {
    pub color: String,
    pub wallpaper_path: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            color: "{{TEMPLATE_COLOUR}}".to_string(),
            wallpaper_path: "{{TEMPLATE_WALLPAPER_FILEPATH}}".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateLine {
    Literal(String),
    Color,
    WallpaperPath,
}

/// A parsed line-oriented config template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    lines: Vec<TemplateLine>,
}

impl Template {
    /// Split `text` into lines and classify each one. Placeholders only match
    /// whole lines; a token embedded in other text stays literal.
    pub fn parse(text: &str, placeholders: &Placeholders) -> Self {
        let lines = text
            .lines()
            .map(|line| {
                if line == placeholders.color {
                    TemplateLine::Color
                } else if line == placeholders.wallpaper_path {
                    TemplateLine::WallpaperPath
                } else {
                    TemplateLine::Literal(line.to_string())
                }
            })
            .collect();
        Self { lines }
    }

    pub fn load(path: &Path, placeholders: &Placeholders) -> Result<Self> {
        info!("reading config template: {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| {
            let path = path.to_path_buf();
            if source.kind() == ErrorKind::NotFound {
                Error::TemplateNotFound { path, source }
            } else {
                Error::TemplateRead { path, source }
            }
        })?;
        Ok(Self::parse(&text, placeholders))
    }

    pub fn lines(&self) -> &[TemplateLine] {
        &self.lines
    }

    /// Substitute placeholders top to bottom.
    ///
    /// Color slots consume `colors` in order; running out is an error and
    /// nothing is returned.
    pub fn render(&self, colors: &[String], wallpaper: &Path) -> Result<String> {
        let mut next = colors.iter();
        let mut out = String::new();

        for (i, line) in self.lines.iter().enumerate() {
            match line {
                TemplateLine::Literal(text) => out.push_str(text),
                TemplateLine::Color => {
                    let color = next.next().ok_or(Error::TemplateExhausted {
                        line: i + 1,
                        available: colors.len(),
                    })?;
                    out.push_str(color);
                }
                TemplateLine::WallpaperPath => {
                    out.push_str(&format!("${WALLPAPER_VARIABLE} = {}", wallpaper.display()));
                }
            }
            out.push('\n');
        }

        Ok(out)
    }
}

/// Write the generated config to `path`.
pub fn write_generated(content: &str, path: &Path) -> Result<()> {
    write_file(path, content.as_bytes())?;
    info!("generated config file: {}", path.display());
    Ok(())
}

pub(crate) fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    let to_err = |source| Error::ConfigWrite {
        path: PathBuf::from(path),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_err)?;
    }
    std::fs::write(path, content).map_err(to_err)
}
