//! Visual theme and color palette

use ratatui::style::{Color, Modifier, Style};

/// Latch color palette
pub struct Theme {
    // Primary branding colors
    pub accent: Color,
    pub background: Color,

    // Status colors
    pub danger: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub selection: Color,

    // Divider strip between content and the pinned bottom area
    pub divider_fill: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(64, 167, 227),    // #40A7E3
            background: Color::Rgb(24, 34, 45), // #18222D

            danger: Color::Rgb(229, 57, 53), // #E53935

            border: Color::Rgb(66, 77, 89),            // #424D59
            border_focused: Color::Rgb(64, 167, 227),  // #40A7E3
            text_primary: Color::Rgb(245, 245, 245),   // #F5F5F5
            text_secondary: Color::Rgb(176, 186, 197), // #B0BAC5
            text_muted: Color::Rgb(112, 124, 137),     // #707C89
            selection: Color::Rgb(43, 82, 120),        // #2B5278

            divider_fill: Color::Rgb(17, 25, 33),
        }
    }
}

impl Theme {
    /// Get default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Get secondary text style
    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Get muted text style
    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Get highlighted text style
    pub fn text_highlight(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Get title style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Get border style
    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Get focused border style
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    /// Get danger style
    pub fn danger(&self) -> Style {
        Style::default()
            .fg(self.danger)
            .add_modifier(Modifier::BOLD)
    }

    /// Get selection/highlight style
    pub fn selection(&self) -> Style {
        Style::default().bg(self.selection).fg(self.text_primary)
    }

    /// Get menu item style
    pub fn menu_item(&self, selected: bool) -> Style {
        if selected {
            Style::default()
                .bg(self.selection)
                .fg(self.text_primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.text_primary)
        }
    }

    /// Get attention (destructive) menu item style
    pub fn attention_item(&self, selected: bool) -> Style {
        let style = Style::default().fg(self.danger);
        if selected {
            style.bg(self.selection).add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Get button style
    pub fn button(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.background)
                .bg(self.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.accent)
        }
    }

    /// Get input field style
    pub fn input(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.text_primary).bg(self.background)
        } else {
            Style::default().fg(self.text_secondary).bg(self.background)
        }
    }

    /// Get selected input contents style
    pub fn input_selected(&self) -> Style {
        Style::default().fg(self.text_primary).bg(self.selection)
    }

    /// Get divider strip style
    pub fn divider(&self) -> Style {
        Style::default().fg(self.border).bg(self.divider_fill)
    }

    /// Create a high-contrast theme variant
    pub fn high_contrast() -> Self {
        Self {
            text_primary: Color::White,
            text_secondary: Color::White,
            text_muted: Color::Gray,
            border: Color::White,
            border_focused: Color::Yellow,
            accent: Color::Yellow,
            ..Self::default()
        }
    }
}
