use ratatui::style::Style;

/// Base styles shared by the widgets in this crate.
///
/// Widget options carry their own style slots; a slot left at `Style::default()` falls back to
/// (or is patched over) the matching theme style at render time.
#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub border: Style,
    pub skeleton: Style,
    pub badge: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            border: Style::default().dark_gray(),
            skeleton: Style::default().dark_gray(),
            badge: Style::default().magenta(),
        }
    }
}
