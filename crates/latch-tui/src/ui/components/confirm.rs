//! Confirmation dialog component

use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::ui::{layout::centered_rect_fixed, Theme};

/// How a confirmation dialog was dismissed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed,
    Cancelled,
}

/// Yes/no modal
pub struct ConfirmBox {
    /// Question shown to the user
    pub message: &'static str,
    /// Label of the confirming action
    pub confirm_text: &'static str,
    /// Whether confirming destroys something
    pub attention: bool,
}

impl ConfirmBox {
    pub fn new(message: &'static str, confirm_text: &'static str) -> Self {
        Self {
            message,
            confirm_text,
            attention: false,
        }
    }

    /// Style the confirm action as destructive
    pub fn attention(mut self) -> Self {
        self.attention = true;
        self
    }

    /// Map a key to an outcome; `None` keeps the dialog open
    pub fn handle_key(&self, key: KeyCode) -> Option<ConfirmOutcome> {
        match key {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                Some(ConfirmOutcome::Confirmed)
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                Some(ConfirmOutcome::Cancelled)
            }
            _ => None,
        }
    }

    /// Render the dialog over `area`
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = centered_rect_fixed(50, 8, area);
        frame.render_widget(Clear, dialog_area);

        let border_style = if self.attention {
            theme.danger()
        } else {
            theme.border_focused()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(2),    // Message
                Constraint::Length(1), // Actions
            ])
            .split(inner);

        let message = Paragraph::new(self.message)
            .style(theme.text())
            .wrap(Wrap { trim: true });
        frame.render_widget(message, chunks[0]);

        let confirm_style = if self.attention {
            theme.danger()
        } else {
            theme.text_highlight()
        };
        let actions = Line::from(vec![
            Span::styled("[Esc] Cancel", theme.text_muted()),
            Span::raw("    "),
            Span::styled(format!("[Enter] {}", self.confirm_text), confirm_style),
        ]);
        frame.render_widget(
            Paragraph::new(actions).alignment(Alignment::Right),
            chunks[1],
        );
    }
}
