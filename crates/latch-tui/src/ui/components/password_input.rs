//! Masked passcode input field

use crossterm::event::KeyCode;
use latch_core::reactive::EventStream;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use zeroize::Zeroizing;

use crate::ui::Theme;

/// Mask character shown for every entered character
const MASK: char = '•';

/// Height the field occupies, borders included
pub const INPUT_HEIGHT: u16 = 3;

/// Single-line input that never renders its contents
pub struct PasswordInput {
    placeholder: &'static str,
    text: Zeroizing<String>,
    /// Whole contents selected; the next edit replaces them
    selected_all: bool,
    /// Inline error indicator, cleared by the next edit
    error_shown: bool,
    changed: EventStream<()>,
}

impl PasswordInput {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            placeholder,
            text: Zeroizing::new(String::new()),
            selected_all: false,
            error_shown: false,
            changed: EventStream::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    /// Fired after every edit of the contents
    pub fn changed(&self) -> EventStream<()> {
        self.changed.clone()
    }

    pub fn show_error(&mut self) {
        self.error_shown = true;
    }

    pub fn has_error(&self) -> bool {
        self.error_shown
    }

    pub fn select_all(&mut self) {
        self.selected_all = !self.text.is_empty();
    }

    pub fn is_selected_all(&self) -> bool {
        self.selected_all
    }

    /// Apply an editing key; returns whether the key was consumed
    pub fn input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(c) => {
                if self.selected_all {
                    self.text.clear();
                }
                self.text.push(c);
                self.edited();
                true
            }
            KeyCode::Backspace => {
                let had_text = !self.text.is_empty();
                if self.selected_all {
                    self.text.clear();
                } else {
                    self.text.pop();
                }
                if had_text {
                    self.edited();
                }
                true
            }
            _ => false,
        }
    }

    fn edited(&mut self) {
        self.selected_all = false;
        self.error_shown = false;
        self.changed.fire(());
    }

    /// Render the field
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let border_style = if self.error_shown {
            theme.danger()
        } else if focused {
            theme.border_focused()
        } else {
            theme.border()
        };

        let block = Block::default()
            .title(format!(" {} ", self.placeholder))
            .title_style(theme.text_secondary())
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let length = self.text.chars().count();
        let masked: String = std::iter::repeat(MASK).take(length).collect();
        let style = if self.selected_all {
            theme.input_selected()
        } else {
            theme.input(focused)
        };
        frame.render_widget(Paragraph::new(masked).style(style), inner);

        if focused && inner.width > 0 && inner.height > 0 {
            let offset = (length as u16).min(inner.width - 1);
            frame.set_cursor_position((inner.x + offset, inner.y));
        }
    }
}
