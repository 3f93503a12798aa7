//! Color themes

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the dashboard
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    /// Secondary text, task ids, references
    pub dim: Color,
    /// Highlights, focused borders, the active section
    pub accent: Color,
    pub error: Color,
    /// Completed tasks
    pub success: Color,
    /// In-flight indicators
    pub warning: Color,
    pub border: Color,
    pub selection_bg: Color,
    /// Inline and block code in assistant replies
    pub code: Color,
    pub link: Color,
    /// One color per section in the completion chart, cycled
    pub palette: [Color; 6],
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            dim: Color::DarkGray,
            accent: Color::Indexed(105),
            error: Color::Red,
            success: Color::Green,
            warning: Color::Yellow,
            border: Color::DarkGray,
            selection_bg: Color::Indexed(236),
            code: Color::Magenta,
            link: Color::Blue,
            palette: Self::chart_palette(),
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            dim: Color::Gray,
            accent: Color::Rgb(79, 70, 229),
            error: Color::Red,
            success: Color::Rgb(16, 185, 129),
            warning: Color::Rgb(180, 120, 0),
            border: Color::Gray,
            selection_bg: Color::Rgb(238, 242, 255),
            code: Color::Magenta,
            link: Color::Blue,
            palette: Self::chart_palette(),
        }
    }

    /// Look up a theme by config name
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    fn chart_palette() -> [Color; 6] {
        [
            Color::Rgb(79, 70, 229),
            Color::Rgb(245, 158, 11),
            Color::Rgb(239, 68, 68),
            Color::Rgb(16, 185, 129),
            Color::Rgb(100, 116, 139),
            Color::Rgb(6, 182, 212),
        ]
    }

    /// Chart color for the section at `index`
    pub fn series_color(&self, index: usize) -> Color {
        self.palette[index % self.palette.len()]
    }

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn accent_bold(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn code_style(&self) -> Style {
        Style::default().fg(self.code)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Border style for a pane, brighter when focused
    pub fn pane_border(&self, focused: bool) -> Style {
        if focused {
            self.accent_style()
        } else {
            self.border_style()
        }
    }

    /// Completed task text
    pub fn done_style(&self) -> Style {
        Style::default()
            .fg(self.dim)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    /// Highlighted row
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }
}
