//! Passcode entry section: create, check or change the local passcode
//!
//! One component serves all three modes. Create and Change collect the
//! passcode twice and commit it; Check compares a single input against the
//! store behind flood control.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use latch_core::reactive::{EventStream, Lifetime};
use latch_core::Services;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use zeroize::Zeroizing;

use super::{Section, SectionId};
use crate::lang;
use crate::ui::components::lock_icon::ICON_HEIGHT;
use crate::ui::components::password_input::INPUT_HEIGHT;
use crate::ui::components::{LockIcon, PasswordInput};
use crate::ui::layout::centered_rect_fixed;
use crate::ui::Theme;

/// How often the auto-close timer looks at idle time
pub const TIMER_CHECK: Duration = Duration::from_secs(60);

/// Idle time after which an open Change section closes itself
pub const AUTO_CLOSE_TIMEOUT: Duration = Duration::from_secs(10 * 60);

const HINTS: &[(&str, &str)] = &[("Enter", "Submit"), ("Tab", "Next field"), ("Esc", "Back")];

/// Which passcode flow the section runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    /// First-time setup
    Create,
    /// Unlock gate
    Check,
    /// Replace an existing passcode
    Change,
}

impl EntryMode {
    pub fn section_id(self) -> SectionId {
        match self {
            EntryMode::Create => SectionId::PasscodeCreate,
            EntryMode::Check => SectionId::PasscodeCheck,
            EntryMode::Change => SectionId::PasscodeChange,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            EntryMode::Create => lang::PASSCODE_CREATE_TITLE,
            EntryMode::Check => lang::PASSCODE_CHECK_TITLE,
            EntryMode::Change => lang::PASSCODE_CHANGE_TITLE,
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            EntryMode::Create => lang::PASSCODE_CREATE_BUTTON,
            EntryMode::Check => lang::PASSCODE_CHECK_BUTTON,
            EntryMode::Change => lang::PASSCODE_CHANGE_BUTTON,
        }
    }

    /// Whether the passcode is typed twice
    pub fn has_confirmation(self) -> bool {
        !matches!(self, EntryMode::Check)
    }
}

/// Focusable parts of the section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    New,
    Reenter,
    Button,
}

/// Error label text; `None` keeps the label hidden
type ErrorLabel = Rc<RefCell<Option<String>>>;

/// Passcode entry section
pub struct PasscodeEnter {
    mode: EntryMode,
    services: Services,
    icon: Rc<RefCell<LockIcon>>,
    new_passcode: PasswordInput,
    reenter_passcode: Option<PasswordInput>,
    focus: Focus,
    error: ErrorLabel,
    show_finished: EventStream<()>,
    show_other: EventStream<SectionId>,
    show_back: EventStream<()>,
    lifetime: Lifetime,
}

impl PasscodeEnter {
    pub fn new(mode: EntryMode, services: Services) -> Self {
        Self::new_at(mode, services, Instant::now())
    }

    /// Build the section with its timers anchored at `now`
    pub fn new_at(mode: EntryMode, services: Services, now: Instant) -> Self {
        let mut lifetime = Lifetime::new();
        let show_finished = EventStream::new();
        let show_other = EventStream::new();
        let show_back = EventStream::new();

        let icon = Rc::new(RefCell::new(LockIcon::new()));
        {
            let icon = Rc::clone(&icon);
            lifetime.add(show_finished.subscribe(move |_| icon.borrow_mut().animate_once()));
        }

        if mode == EntryMode::Change {
            setup_auto_close_timer(&mut lifetime, &services, &show_back, now);
        }

        let new_passcode = PasswordInput::new(lang::PASSCODE_ENTER_FIRST);
        let reenter_passcode = mode
            .has_confirmation()
            .then(|| PasswordInput::new(lang::PASSCODE_CONFIRM_NEW));

        let error: ErrorLabel = Rc::new(RefCell::new(None));
        lifetime.add(hide_on_change(&new_passcode, &error));
        if let Some(reenter) = &reenter_passcode {
            lifetime.add(hide_on_change(reenter, &error));
        }

        Self {
            mode,
            services,
            icon,
            new_passcode,
            reenter_passcode,
            focus: Focus::New,
            error,
            show_finished,
            show_other,
            show_back,
            lifetime,
        }
    }

    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn error_text(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn new_field(&self) -> &PasswordInput {
        &self.new_passcode
    }

    pub fn reenter_field(&self) -> Option<&PasswordInput> {
        self.reenter_passcode.as_ref()
    }

    pub fn icon_playing(&self) -> bool {
        self.icon.borrow().is_playing()
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = match focus {
            Focus::Reenter if self.reenter_passcode.is_none() => Focus::New,
            other => other,
        };
    }

    fn show_error(&self, text: impl Into<String>) {
        *self.error.borrow_mut() = Some(text.into());
    }

    fn focus_next(&mut self) {
        let next = match (self.focus, self.reenter_passcode.is_some()) {
            (Focus::New, true) => Focus::Reenter,
            (Focus::New, false) | (Focus::Reenter, _) => Focus::Button,
            (Focus::Button, _) => Focus::New,
        };
        self.set_focus(next);
    }

    fn focus_previous(&mut self) {
        let previous = match (self.focus, self.reenter_passcode.is_some()) {
            (Focus::New, _) => Focus::Button,
            (Focus::Reenter, _) => Focus::New,
            (Focus::Button, true) => Focus::Reenter,
            (Focus::Button, false) => Focus::New,
        };
        self.set_focus(previous);
    }

    /// Enter pressed inside one of the fields
    fn submitted(&mut self) {
        if self.reenter_passcode.is_none() || self.focus == Focus::Reenter {
            self.validate();
        } else {
            self.set_focus(Focus::Reenter);
        }
    }

    /// Run the validation for the current mode, as the submit button does
    pub fn validate(&mut self) {
        let new_text = Zeroizing::new(self.new_passcode.text().to_owned());
        if new_text.is_empty() {
            self.set_focus(Focus::New);
            self.new_passcode.show_error();
            return;
        }

        match self.mode {
            EntryMode::Create | EntryMode::Change => self.validate_new(&new_text),
            EntryMode::Check => self.validate_check(&new_text),
        }
    }

    fn validate_new(&mut self, new_text: &str) {
        let reenter_text = Zeroizing::new(
            self.reenter_passcode
                .as_ref()
                .map(|field| field.text().to_owned())
                .unwrap_or_default(),
        );

        if reenter_text.is_empty() {
            self.set_focus(Focus::Reenter);
            if let Some(field) = self.reenter_passcode.as_mut() {
                field.show_error();
            }
            return;
        }

        if new_text != reenter_text.as_str() {
            self.set_focus(Focus::Reenter);
            if let Some(field) = self.reenter_passcode.as_mut() {
                field.show_error();
                field.select_all();
            }
            self.show_error(lang::PASSCODE_DIFFER);
            return;
        }

        // Reuse check; deliberately not counted by flood control.
        if self.mode == EntryMode::Change && self.services.check_passcode(new_text.as_bytes()) {
            self.set_focus(Focus::New);
            self.new_passcode.show_error();
            self.new_passcode.select_all();
            self.show_error(lang::PASSCODE_IS_SAME);
            return;
        }

        if let Err(e) = self.services.set_passcode(new_text.as_bytes()) {
            tracing::error!("Failed to save local passcode: {}", e);
            self.show_error(lang::PASSCODE_SAVE_FAILED);
            return;
        }

        if self.mode == EntryMode::Create {
            self.show_other.fire(SectionId::PasscodeManage);
        } else {
            self.show_back.fire(());
        }
    }

    fn validate_check(&mut self, new_text: &str) {
        let now = Instant::now();
        if !self.services.flood.borrow().can_try_at(now) {
            tracing::warn!("Passcode check refused by flood control");
            self.set_focus(Focus::New);
            self.new_passcode.show_error();
            self.show_error(lang::FLOOD_ERROR);
            return;
        }

        if self.services.check_passcode(new_text.as_bytes()) {
            self.services.flood.borrow_mut().set_bad_tries(0);
            self.show_other.fire(SectionId::PasscodeManage);
            return;
        }

        let bad_tries = {
            let mut flood = self.services.flood.borrow_mut();
            let bad_tries = flood.bad_tries() + 1;
            flood.set_bad_tries(bad_tries);
            flood.set_last_try_time(now);
            bad_tries
        };
        tracing::warn!("Wrong local passcode ({} bad tries)", bad_tries);

        self.new_passcode.select_all();
        self.set_focus(Focus::New);
        self.new_passcode.show_error();
        self.show_error(lang::PASSCODE_WRONG);
    }

    fn focused_field_mut(&mut self) -> Option<&mut PasswordInput> {
        match self.focus {
            Focus::New => Some(&mut self.new_passcode),
            Focus::Reenter => self.reenter_passcode.as_mut(),
            Focus::Button => None,
        }
    }
}

/// Close via `show_back` once the user has been idle long enough
pub(super) fn setup_auto_close_timer(
    lifetime: &mut Lifetime,
    services: &Services,
    show_back: &EventStream<()>,
    now: Instant,
) {
    let idle = Rc::clone(&services.idle);
    let show_back = show_back.clone();
    lifetime.call_each(TIMER_CHECK, now, move |now| {
        if idle.idle_time_at(now) >= AUTO_CLOSE_TIMEOUT {
            tracing::debug!("Closing passcode section after inactivity");
            show_back.fire(());
        }
    });
}

fn hide_on_change(
    field: &PasswordInput,
    error: &ErrorLabel,
) -> latch_core::reactive::Subscription {
    let error = Rc::clone(error);
    field.changed().subscribe(move |_| {
        *error.borrow_mut() = None;
    })
}

impl Section for PasscodeEnter {
    fn id(&self) -> SectionId {
        self.mode.section_id()
    }

    fn title(&self) -> &'static str {
        lang::SETTINGS_PASSCODE_TITLE
    }

    fn show_finished(&mut self) {
        self.show_finished.fire(());
    }

    fn set_inner_focus(&mut self) {
        let reenter_empty = self
            .reenter_passcode
            .as_ref()
            .is_some_and(|field| field.is_empty());

        if self.new_passcode.is_empty() {
            self.set_focus(Focus::New);
        } else if reenter_empty {
            self.set_focus(Focus::Reenter);
        } else {
            self.set_focus(Focus::New);
        }
    }

    fn section_show_other(&self) -> EventStream<SectionId> {
        self.show_other.clone()
    }

    fn section_show_back(&self) -> EventStream<()> {
        self.show_back.clone()
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.show_back.fire(()),
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_previous(),
            KeyCode::Enter => match self.focus {
                Focus::Button => self.validate(),
                Focus::New | Focus::Reenter => self.submitted(),
            },
            other => {
                if let Some(field) = self.focused_field_mut() {
                    field.input(other);
                }
            }
        }
    }

    fn tick(&mut self, now: Instant) {
        self.icon.borrow_mut().tick();
        self.lifetime.tick(now);
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let fields = if self.reenter_passcode.is_some() { 2 } else { 1 };
        let height = ICON_HEIGHT + 2 + 2 + 3 + 1 + fields * INPUT_HEIGHT + 1 + 1 + 4;
        let dialog = centered_rect_fixed(56, height, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_focused());
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let mut constraints = vec![
            Constraint::Length(ICON_HEIGHT), // Icon
            Constraint::Length(1),           // Skip
            Constraint::Length(2),           // Title
            Constraint::Length(2),           // About 1
            Constraint::Length(3),           // About 2
            Constraint::Length(INPUT_HEIGHT), // New passcode
        ];
        if self.reenter_passcode.is_some() {
            constraints.push(Constraint::Length(INPUT_HEIGHT)); // Re-enter
        }
        constraints.push(Constraint::Length(1)); // Error
        constraints.push(Constraint::Length(1)); // Skip
        constraints.push(Constraint::Length(1)); // Button
        constraints.push(Constraint::Min(0));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(2)
            .constraints(constraints)
            .split(inner);

        self.icon.borrow().render(frame, chunks[0], theme);

        let title = Paragraph::new(self.mode.title())
            .style(theme.title())
            .alignment(Alignment::Center);
        frame.render_widget(title, chunks[2]);

        for (text, chunk) in [(lang::PASSCODE_ABOUT1, chunks[3]), (lang::PASSCODE_ABOUT2, chunks[4])] {
            let about = Paragraph::new(text)
                .style(theme.text_secondary())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(about, chunk);
        }

        let field_area = |chunk: Rect| centered_rect_fixed(32, INPUT_HEIGHT, chunk);
        self.new_passcode
            .render(frame, field_area(chunks[5]), theme, self.focus == Focus::New);

        let mut next = 6;
        if let Some(reenter) = &self.reenter_passcode {
            reenter.render(frame, field_area(chunks[next]), theme, self.focus == Focus::Reenter);
            next += 1;
        }

        if let Some(error) = self.error.borrow().as_deref() {
            let error_widget = Paragraph::new(error)
                .style(theme.danger())
                .alignment(Alignment::Center);
            frame.render_widget(error_widget, chunks[next]);
        }

        let button = Paragraph::new(format!("  {}  ", self.mode.button_label()))
            .style(theme.button(self.focus == Focus::Button))
            .alignment(Alignment::Center);
        let label_width = self.mode.button_label().chars().count() as u16 + 4;
        frame.render_widget(button, centered_rect_fixed(label_width, 1, chunks[next + 2]));
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        HINTS
    }
}
