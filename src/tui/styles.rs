use ratatui::style::{Color, Modifier, Style};

use crate::catalog::ColorVariant;

/// Application theme configuration
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary colors
    pub primary: Color,

    /// Text colors
    pub text: Color,
    pub text_dim: Color,
    pub text_bright: Color,

    /// Background colors
    pub background: Color,
    pub background_alt: Color,

    /// Border colors
    pub border: Color,
    pub border_focused: Color,

    /// Rating stars
    pub star: Color,

    /// Controls that cannot be used right now
    pub disabled: Color,

    pub placeholder: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme
    pub fn dark() -> Self {
        Self {
            primary: Color::Rgb(230, 202, 151),   // Yellow gold

            text: Color::Rgb(248, 250, 252),      // Slate-50
            text_dim: Color::Rgb(148, 163, 184),  // Slate-400
            text_bright: Color::Rgb(255, 255, 255),

            background: Color::Rgb(15, 23, 42),   // Slate-900
            background_alt: Color::Rgb(30, 41, 59), // Slate-800

            border: Color::Rgb(71, 85, 105),      // Slate-600
            border_focused: Color::Rgb(230, 202, 151),

            star: Color::Rgb(245, 158, 11),       // Amber-500
            disabled: Color::Rgb(51, 65, 85),     // Slate-700

            placeholder: Color::Rgb(100, 116, 139), // Slate-500
        }
    }

    /// Base style for normal elements
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    /// Style for text content
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Style for secondary text such as image references
    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    /// Style for product titles
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.text_bright)
            .add_modifier(Modifier::BOLD)
    }

    pub fn price_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for focused borders
    pub fn focused_border_style(&self) -> Style {
        Style::default()
            .fg(self.border_focused)
            .add_modifier(Modifier::BOLD)
    }

    pub fn star_style(&self) -> Style {
        Style::default().fg(self.star)
    }

    /// Swatch for a color variant, boxed when it is the selected one
    pub fn swatch_style(&self, variant: ColorVariant, selected: bool) -> Style {
        let (r, g, b) = variant.rgb();
        let style = Style::default().fg(Color::Rgb(r, g, b));
        if selected {
            style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            style
        }
    }

    /// Navigation arrow, dimmed when it cannot be used
    pub fn nav_style(&self, enabled: bool) -> Style {
        if enabled {
            Style::default()
                .fg(self.text_bright)
                .bg(self.background_alt)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.disabled)
        }
    }

    /// Page dot, highlighted for the current page
    pub fn dot_style(&self, current: bool) -> Style {
        if current {
            Style::default().fg(self.text_bright)
        } else {
            Style::default().fg(self.text_dim)
        }
    }

    /// Style for the status bar
    pub fn status_bar_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background_alt)
    }

    /// Style for help text
    pub fn help_style(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.background)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for placeholder text
    pub fn placeholder_style(&self) -> Style {
        Style::default()
            .fg(self.placeholder)
            .add_modifier(Modifier::ITALIC)
    }
}
