use ratatui::style::Color;

/// Color theme for the playground
#[derive(Debug, Clone)]
pub struct Theme {
    /// Foreground (text) color
    pub fg: Color,
    /// Background for the title bar
    pub titlebar_bg: Color,
    /// Foreground for the title bar
    pub titlebar_fg: Color,
    /// Background for the status bar
    pub statusbar_bg: Color,
    /// Foreground for the status bar
    pub statusbar_fg: Color,
    /// Border color
    pub border: Color,
    /// Border color while an action is pending
    pub border_pending: Color,
    /// Log color for `tap`
    pub tap: Color,
    /// Log color for `dbltap`
    pub dbltap: Color,
    /// Log color for actions
    pub action: Color,
    /// Log color for notices
    pub notice: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            fg: Color::Rgb(212, 212, 212),
            titlebar_bg: Color::Rgb(60, 60, 60),
            titlebar_fg: Color::Rgb(204, 204, 204),
            statusbar_bg: Color::Rgb(0, 122, 204),
            statusbar_fg: Color::White,
            border: Color::Rgb(60, 60, 60),
            border_pending: Color::Rgb(206, 145, 120),
            tap: Color::Rgb(86, 156, 214),
            dbltap: Color::Rgb(197, 134, 192),
            action: Color::Rgb(106, 153, 85),
            notice: Color::Rgb(128, 128, 128),
        }
    }
}
