//! Local passcode management screen

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use crossterm::event::KeyCode;
use latch_core::format_auto_lock;
use latch_core::reactive::{EventStream, Lifetime};
use latch_core::Services;
use ratatui::prelude::*;
use ratatui::widgets::{Borders, Paragraph};

use super::passcode_enter::setup_auto_close_timer;
use super::{Section, SectionId};
use crate::lang;
use crate::ui::components::{AutoLockBox, ConfirmBox, ConfirmOutcome, Divider};
use crate::ui::layout::split_bottom;
use crate::ui::Theme;

/// Rows taken by the pinned "disable" strip
const PINNED_HEIGHT: u16 = 3;

/// Rows taken by the explanatory divider
const ABOUT_HEIGHT: u16 = 7;

const HINTS: &[(&str, &str)] = &[("↑↓", "Navigate"), ("Enter", "Select"), ("Esc", "Back")];

/// Selectable rows, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageItem {
    ChangePasscode,
    AutoLock,
    Disable,
}

impl ManageItem {
    pub const ALL: [ManageItem; 3] = [
        ManageItem::ChangePasscode,
        ManageItem::AutoLock,
        ManageItem::Disable,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|item| *item == self).unwrap_or(0)
    }
}

/// Change / auto-lock / disable screen
pub struct PasscodeManage {
    services: Services,
    selected: ManageItem,
    auto_lock_label: Rc<RefCell<String>>,
    auto_lock_box: Option<AutoLockBox>,
    disable_confirm: Option<ConfirmBox>,
    about_divider: Divider,
    filler_divider: Divider,
    bottom_filler_shown: bool,
    error: Option<&'static str>,
    show_other: EventStream<SectionId>,
    show_back: EventStream<()>,
    lifetime: Lifetime,
}

impl PasscodeManage {
    pub fn new(services: Services) -> Self {
        Self::new_at(services, Instant::now())
    }

    pub fn new_at(services: Services, now: Instant) -> Self {
        let mut lifetime = Lifetime::new();
        let show_back = EventStream::new();
        setup_auto_close_timer(&mut lifetime, &services, &show_back, now);

        let label = format_auto_lock(services.settings.auto_lock());

        let mut filler_divider = Divider::new();
        filler_divider.skip_edge(Borders::TOP, true);

        Self {
            services,
            selected: ManageItem::ChangePasscode,
            auto_lock_label: Rc::new(RefCell::new(label)),
            auto_lock_box: None,
            disable_confirm: None,
            about_divider: Divider::new(),
            filler_divider,
            bottom_filler_shown: false,
            error: None,
            show_other: EventStream::new(),
            show_back,
            lifetime,
        }
    }

    pub fn selected(&self) -> ManageItem {
        self.selected
    }

    pub fn auto_lock_label(&self) -> String {
        self.auto_lock_label.borrow().clone()
    }

    /// Caption of the auto-lock row
    pub fn auto_lock_caption(&self) -> &'static str {
        if self.services.idle.system_idle_supported() {
            lang::PASSCODE_AUTOLOCK_AWAY
        } else {
            lang::PASSCODE_AUTOLOCK_INACTIVE
        }
    }

    pub fn auto_lock_box_open(&self) -> bool {
        self.auto_lock_box.is_some()
    }

    pub fn confirm_open(&self) -> bool {
        self.disable_confirm.is_some()
    }

    pub fn error_text(&self) -> Option<&'static str> {
        self.error
    }

    pub fn about_divider(&self) -> &Divider {
        &self.about_divider
    }

    pub fn filler_divider(&self) -> &Divider {
        &self.filler_divider
    }

    fn set_bottom_filler_shown(&mut self, shown: bool) {
        self.bottom_filler_shown = shown;
        self.about_divider.skip_edge(Borders::BOTTOM, shown);
    }

    fn activate(&mut self) {
        self.error = None;
        match self.selected {
            ManageItem::ChangePasscode => self.show_other.fire(SectionId::PasscodeChange),
            ManageItem::AutoLock => self.open_auto_lock_box(),
            ManageItem::Disable => {
                self.disable_confirm = Some(
                    ConfirmBox::new(
                        lang::SETTINGS_PASSCODE_DISABLE_SURE,
                        lang::SETTINGS_DISABLE_CONFIRM,
                    )
                    .attention(),
                );
            }
        }
    }

    fn open_auto_lock_box(&mut self) {
        let mut dialog = AutoLockBox::new(Rc::clone(&self.services.settings));

        let label = Rc::clone(&self.auto_lock_label);
        let settings = Rc::clone(&self.services.settings);
        let sub = dialog.box_closing().subscribe(move |_| {
            *label.borrow_mut() = format_auto_lock(settings.auto_lock());
        });
        dialog.lifetime_mut().add(sub);

        self.auto_lock_box = Some(dialog);
    }

    fn disable(&mut self) {
        match self.services.set_passcode(b"") {
            Ok(()) => {
                tracing::info!("Local passcode disabled");
                self.show_back.fire(());
            }
            Err(e) => {
                tracing::error!("Failed to disable local passcode: {}", e);
                self.error = Some(lang::SETTINGS_DISABLE_FAILED);
            }
        }
    }

    fn move_selection(&mut self, down: bool) {
        let index = self.selected.index();
        let next = if down {
            (index + 1).min(ManageItem::ALL.len() - 1)
        } else {
            index.saturating_sub(1)
        };
        self.selected = ManageItem::ALL[next];
    }

    fn render_row(&self, frame: &mut Frame, area: Rect, theme: &Theme, item: ManageItem) {
        let selected = self.selected == item;
        let marker = if selected { "▶ " } else { "  " };

        let line = match item {
            ManageItem::ChangePasscode => Line::from(vec![
                Span::raw(marker),
                Span::styled(lang::PASSCODE_CHANGE, theme.menu_item(selected)),
            ]),
            ManageItem::AutoLock => Line::from(vec![
                Span::raw(marker),
                Span::styled(self.auto_lock_caption(), theme.menu_item(selected)),
                Span::raw("  "),
                Span::styled(self.auto_lock_label(), theme.text_highlight()),
            ]),
            ManageItem::Disable => Line::from(vec![
                Span::raw(marker),
                Span::styled(lang::SETTINGS_PASSCODE_DISABLE, theme.attention_item(selected)),
            ]),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Section for PasscodeManage {
    fn id(&self) -> SectionId {
        SectionId::PasscodeManage
    }

    fn title(&self) -> &'static str {
        lang::SETTINGS_PASSCODE_TITLE
    }

    fn section_show_other(&self) -> EventStream<SectionId> {
        self.show_other.clone()
    }

    fn section_show_back(&self) -> EventStream<()> {
        self.show_back.clone()
    }

    fn remove_from_stack(&self) -> Vec<SectionId> {
        vec![
            SectionId::PasscodeManage,
            SectionId::PasscodeCreate,
            SectionId::PasscodeCheck,
            SectionId::PasscodeChange,
        ]
    }

    fn create_pinned_to_bottom(&mut self, parent: Rect) -> Option<Rect> {
        let (_, bottom) = split_bottom(parent, PINNED_HEIGHT);
        Some(bottom)
    }

    fn handle_key(&mut self, key: KeyCode) {
        if let Some(dialog) = self.auto_lock_box.as_mut() {
            dialog.handle_key(key);
            if dialog.is_closed() {
                self.auto_lock_box = None;
            }
            return;
        }

        if let Some(confirm) = &self.disable_confirm {
            if let Some(outcome) = confirm.handle_key(key) {
                self.disable_confirm = None;
                if outcome == ConfirmOutcome::Confirmed {
                    self.disable();
                }
            }
            return;
        }

        match key {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Enter => self.activate(),
            KeyCode::Esc => self.show_back.fire(()),
            _ => {}
        }
    }

    fn tick(&mut self, now: Instant) {
        self.lifetime.tick(now);
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),            // Skip
                Constraint::Length(1),            // Change passcode
                Constraint::Length(1),            // Auto-lock
                Constraint::Length(1),            // Status
                Constraint::Length(ABOUT_HEIGHT), // About
                Constraint::Min(0),               // Filler
            ])
            .split(area);

        self.set_bottom_filler_shown(chunks[5].height > 0);

        let rows = chunks[1].inner(Margin::new(2, 0));
        self.render_row(frame, rows, theme, ManageItem::ChangePasscode);
        let rows = chunks[2].inner(Margin::new(2, 0));
        self.render_row(frame, rows, theme, ManageItem::AutoLock);

        if let Some(error) = self.error {
            let status = Paragraph::new(error)
                .style(theme.danger())
                .alignment(Alignment::Center);
            frame.render_widget(status, chunks[3]);
        }

        let about = format!("{}\n\n{}", lang::PASSCODE_ABOUT1, lang::PASSCODE_ABOUT3);
        self.about_divider
            .render(frame, chunks[4], theme, Some(about.as_str()));
        if self.bottom_filler_shown {
            self.filler_divider.render(frame, chunks[5], theme, None);
        }
    }

    fn render_pinned_to_bottom(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let row = Rect {
            y: area.y + area.height / 2,
            height: 1.min(area.height),
            ..area
        }
        .inner(Margin::new(2, 0));
        self.render_row(frame, row, theme, ManageItem::Disable);

        // Dialogs go last so they cover the whole section.
        let full = Rect {
            y: frame.area().y,
            height: frame.area().height,
            ..area
        };
        if let Some(dialog) = &self.auto_lock_box {
            dialog.render(frame, full, theme);
        }
        if let Some(confirm) = &self.disable_confirm {
            confirm.render(frame, full, theme);
        }
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        HINTS
    }
}
