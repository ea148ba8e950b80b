//! Auto-lock duration picker

use std::rc::Rc;

use crossterm::event::KeyCode;
use latch_core::reactive::{EventStream, Lifetime};
use latch_core::{format_auto_lock, Settings, AUTO_LOCK_OPTIONS};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState};

use crate::lang;
use crate::ui::{layout::centered_rect_fixed, Theme};

/// Modal list of auto-lock durations
///
/// Choosing an entry writes it to the settings service. Either way the box
/// fires `box_closing` once and reports itself closed.
pub struct AutoLockBox {
    settings: Rc<Settings>,
    selected: usize,
    closed: bool,
    box_closing: EventStream<()>,
    lifetime: Lifetime,
}

impl AutoLockBox {
    pub fn new(settings: Rc<Settings>) -> Self {
        let current = settings.auto_lock();
        let selected = AUTO_LOCK_OPTIONS
            .iter()
            .position(|seconds| *seconds == current)
            .unwrap_or(0);

        Self {
            settings,
            selected,
            closed: false,
            box_closing: EventStream::new(),
            lifetime: Lifetime::new(),
        }
    }

    pub fn box_closing(&self) -> EventStream<()> {
        self.box_closing.clone()
    }

    /// Subscriptions tied to this box
    pub fn lifetime_mut(&mut self) -> &mut Lifetime {
        &mut self.lifetime
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        if self.closed {
            return;
        }
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < AUTO_LOCK_OPTIONS.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter => {
                let seconds = AUTO_LOCK_OPTIONS[self.selected];
                self.settings.set_auto_lock(seconds);
                self.close();
            }
            KeyCode::Esc => self.close(),
            _ => {}
        }
    }

    fn close(&mut self) {
        self.closed = true;
        self.box_closing.fire(());
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let height = AUTO_LOCK_OPTIONS.len() as u16 + 2;
        let dialog_area = centered_rect_fixed(32, height, area);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(format!(" {} ", lang::AUTOLOCK_BOX_TITLE))
            .title_style(theme.title())
            .borders(Borders::ALL)
            .border_style(theme.border_focused());

        let items: Vec<ListItem> = AUTO_LOCK_OPTIONS
            .iter()
            .map(|seconds| ListItem::new(format!(" {}", format_auto_lock(*seconds))))
            .collect();

        let list = List::new(items)
            .block(block)
            .style(theme.text())
            .highlight_style(theme.selection())
            .highlight_symbol("▶");

        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, dialog_area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn settings(auto_lock: u32) -> Rc<Settings> {
        Rc::new(Settings::new(auto_lock))
    }

    #[test]
    fn test_starts_on_current_value() {
        let dialog = AutoLockBox::new(settings(3600));
        assert_eq!(dialog.selected(), 2);
    }

    #[test]
    fn test_enter_writes_setting_and_closes() {
        let shared = settings(3600);
        let mut dialog = AutoLockBox::new(Rc::clone(&shared));
        let closings = Rc::new(Cell::new(0));
        let sink = Rc::clone(&closings);
        let sub = dialog.box_closing().subscribe(move |_| sink.set(sink.get() + 1));
        dialog.lifetime_mut().add(sub);

        dialog.handle_key(KeyCode::Down);
        dialog.handle_key(KeyCode::Enter);

        assert_eq!(shared.auto_lock(), 5 * 3600);
        assert!(dialog.is_closed());
        assert_eq!(closings.get(), 1);

        // Closed boxes ignore further input.
        dialog.handle_key(KeyCode::Esc);
        assert_eq!(closings.get(), 1);
    }

    #[test]
    fn test_escape_keeps_setting() {
        let shared = settings(300);
        let mut dialog = AutoLockBox::new(Rc::clone(&shared));
        dialog.handle_key(KeyCode::Up);
        dialog.handle_key(KeyCode::Esc);

        assert!(dialog.is_closed());
        assert_eq!(shared.auto_lock(), 300);
    }
}
