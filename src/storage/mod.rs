pub mod prefs;

pub use prefs::{detect_color_scheme, ColorScheme, ThemePrefs};
