use crate::utils::paths::get_theme_pref_path;
use anyhow::{anyhow, Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::str::FromStr;

/// The persisted theme flag. Stored as the literal string `"dark"` or
/// `"light"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Dark,
    Light,
}

impl ColorScheme {
    pub fn toggled(self) -> Self {
        match self {
            ColorScheme::Dark => ColorScheme::Light,
            ColorScheme::Light => ColorScheme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Dark => "dark",
            ColorScheme::Light => "light",
        }
    }
}

impl FromStr for ColorScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dark" => Ok(ColorScheme::Dark),
            "light" => Ok(ColorScheme::Light),
            other => Err(anyhow!("unknown color scheme '{other}'")),
        }
    }
}

/// Best-effort store for the theme preference.
///
/// Writes are fire-and-forget: a failed write is logged and the
/// in-memory theme still applies for the session. Nothing here retries
/// and nothing surfaces to the user.
#[derive(Debug)]
pub struct ThemePrefs {
    path: PathBuf,
}

impl ThemePrefs {
    pub fn open_default() -> Result<Self> {
        Ok(Self {
            path: get_theme_pref_path()?,
        })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads the stored preference, if any. Unreadable or malformed
    /// files count as "no preference".
    pub fn load(&self) -> Option<ColorScheme> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    tracing::warn!("failed to read theme preference: {e}");
                }
                return None;
            }
        };

        content.trim().parse().ok()
    }

    pub fn store(&self, scheme: ColorScheme) {
        if let Some(parent) = self.path.parent()
            && !parent.exists()
            && let Err(e) = fs::create_dir_all(parent)
        {
            tracing::warn!("failed to create preference directory: {e}");
            return;
        }

        if let Err(e) = fs::write(&self.path, scheme.as_str()) {
            tracing::warn!("failed to persist theme preference: {e}");
        }
    }

    /// Stored preference if present, otherwise the terminal-reported
    /// scheme.
    pub fn initial_scheme(&self) -> ColorScheme {
        self.load().unwrap_or_else(detect_color_scheme)
    }
}

/// Guesses the terminal's color scheme from the `COLORFGBG` variable
/// some terminals export ("fg;bg", background 7 or 15 meaning a light
/// background). Unknown terminals are assumed dark.
pub fn detect_color_scheme() -> ColorScheme {
    let Ok(value) = std::env::var("COLORFGBG") else {
        return ColorScheme::Dark;
    };

    match value.rsplit(';').next().and_then(|bg| bg.parse::<u8>().ok()) {
        Some(7) | Some(15) => ColorScheme::Light,
        _ => ColorScheme::Dark,
    }
}
