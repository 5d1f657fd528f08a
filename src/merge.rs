//! Appending generated blocks to the user's own Hyprland config.
//!
//! The user config is handled as raw bytes so a file that is not valid
//! UTF-8 is backed up and kept verbatim.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::template::write_file;

/// Border settings shipped with the binary.
pub const BORDER_SETTINGS: &str = include_str!("../static/border_settings.conf");

const RULE: &str = "################################################";
const COLOR_REF: &str = "$color";

/// Read the live user config.
///
/// `Ok(None)` means there is no file yet, so no backup is needed. Any other
/// read failure is an error: the file exists and must not be replaced.
pub fn read_user_config(path: &Path) -> Result<Option<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(bytes) => {
            info!("read user config: {}", path.display());
            Ok(Some(bytes))
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!("no user config at {}, starting from empty", path.display());
            Ok(None)
        }
        Err(source) => Err(Error::UserConfigRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Point every `$colorN` with `N >= available` at the last generated color.
///
/// Leaves `text` alone when there are no colors at all.
pub fn fit_color_refs(text: &str, available: usize) -> String {
    let Some(last) = available.checked_sub(1) else {
        return text.to_string();
    };
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(at) = rest.find(COLOR_REF) {
        let (head, tail) = rest.split_at(at + COLOR_REF.len());
        out.push_str(head);
        let digits = tail.bytes().take_while(u8::is_ascii_digit).count();
        match tail[..digits].parse::<usize>() {
            Ok(index) if index > last => {
                debug!("{COLOR_REF}{index} mapped to {COLOR_REF}{last}");
                out.push_str(&last.to_string());
            }
            _ => out.push_str(&tail[..digits]),
        }
        rest = &tail[digits..];
    }
    out.push_str(rest);
    out
}

fn push_banner(out: &mut Vec<u8>, title: &str) {
    out.push(b'\n');
    out.extend_from_slice(RULE.as_bytes());
    out.extend_from_slice(b"\n# ");
    out.extend_from_slice(title.as_bytes());
    out.push(b'\n');
    out.extend_from_slice(RULE.as_bytes());
    out.extend_from_slice(b"\n\n");
}

/// Append the generated colors block.
pub fn append_colors(user_config: &[u8], color_lines: &[String]) -> Vec<u8> {
    let mut out = user_config.to_vec();
    push_banner(&mut out, "AUTOMATICALLY GENERATED COLORS");
    for line in color_lines {
        out.extend_from_slice(line.as_bytes());
        out.push(b'\n');
    }
    out.push(b'\n');
    out
}

/// Append the generated borders block.
pub fn append_borders(user_config: &[u8], borders: &str) -> Vec<u8> {
    let mut out = user_config.to_vec();
    push_banner(&mut out, "AUTOMATICALLY GENERATED BORDERS");
    out.extend_from_slice(borders.as_bytes());
    out.push(b'\n');
    out
}

/// The user config followed by the colors block and the borders block.
///
/// Border color references are fitted to the colors actually generated.
pub fn merge_config(user_config: &[u8], color_lines: &[String], borders: &str) -> Vec<u8> {
    let borders = fit_color_refs(borders, color_lines.len());
    let merged = append_borders(&append_colors(user_config, color_lines), &borders);
    debug!("merged user config:\n{}", String::from_utf8_lossy(&merged));
    merged
}

pub fn write_backup(original: &[u8], path: &Path) -> Result<()> {
    write_file(path, original)?;
    info!("backed up original user config: {}", path.display());
    Ok(())
}

pub fn write_merged(merged: &[u8], path: &Path) -> Result<()> {
    write_file(path, merged)?;
    info!("wrote merged user config: {}", path.display());
    Ok(())
}
