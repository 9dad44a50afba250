use ratatui::style::Color;
use remotodo::storage::ColorScheme;

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub done: Color,
    pub accent: Color,
    pub border: Color,
    pub hint: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(18, 18, 18),
            foreground: Color::White,
            done: Color::DarkGray,
            accent: Color::Cyan,
            border: Color::Rgb(80, 80, 80),
            hint: Color::DarkGray,
            status_bar_bg: Color::Rgb(40, 40, 40),
            status_bar_fg: Color::White,
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::White,
            foreground: Color::Black,
            done: Color::Gray,
            accent: Color::Blue,
            border: Color::Rgb(180, 180, 180),
            hint: Color::Gray,
            status_bar_bg: Color::LightBlue,
            status_bar_fg: Color::Black,
        }
    }

    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Dark => Self::dark(),
            ColorScheme::Light => Self::light(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
