//! Host application: section routing, auto-lock and the event loop

pub mod config;
pub mod events;
pub mod router;

pub use config::{ConfigError, LatchConfig, ThemeChoice};
pub use events::{Event, EventHandler};
pub use router::Router;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use latch_core::reactive::Lifetime;
use latch_core::{
    IdleTimeProvider, InputActivity, LocalPasscodeStore, PasscodeStore, Services, Settings,
};
use ratatui::prelude::*;

use crate::sections::{create_section, Section, SectionId};
use crate::ui::{self, Theme};

/// Render and timer tick rate
pub const TICK_RATE: Duration = Duration::from_millis(100);

/// Navigation requested by the current section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Navigation {
    Show(SectionId),
    Back,
}

/// Main application struct
pub struct App {
    services: Services,
    activity: Rc<InputActivity>,
    config: Rc<RefCell<LatchConfig>>,
    router: Router,
    pub(crate) section: Option<Box<dyn Section>>,
    navigation: Rc<RefCell<VecDeque<Navigation>>>,
    /// Host subscriptions to the current section's streams
    section_lifetime: Lifetime,
    app_lifetime: Lifetime,
    pub(crate) theme: Theme,
    should_quit: bool,
}

impl App {
    /// Open the stores under `data_dir` (or the user config dir)
    pub fn new(data_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let dir = data_dir
            .or_else(LatchConfig::config_dir)
            .ok_or(ConfigError::NoConfigDir)?;

        let config_path = LatchConfig::file_in(&dir);
        let config = LatchConfig::load_from(&config_path);
        let store = LocalPasscodeStore::open_in(&dir)?;
        tracing::info!("Using data directory {:?}", dir);

        Ok(Self::from_parts(store, config, Some(config_path)))
    }

    /// Build the app over an explicit store; `config_path: None` never saves
    pub fn from_parts(
        store: impl PasscodeStore + 'static,
        config: LatchConfig,
        config_path: Option<PathBuf>,
    ) -> Self {
        let activity = Rc::new(InputActivity::new());
        let services = Services::new(store, activity.clone(), Settings::new(config.auto_lock));

        let theme = match config.theme {
            ThemeChoice::Dark => Theme::default(),
            ThemeChoice::HighContrast => Theme::high_contrast(),
        };
        let config = Rc::new(RefCell::new(config));

        let mut app_lifetime = Lifetime::new();
        {
            let config = Rc::clone(&config);
            let changes = services.settings.auto_lock_changes();
            app_lifetime.add(changes.subscribe(move |seconds| {
                let mut config = config.borrow_mut();
                config.auto_lock = *seconds;
                if let Some(path) = &config_path {
                    if let Err(e) = config.save_to(path) {
                        tracing::error!("Failed to save config: {}", e);
                    }
                }
            }));
        }

        let mut app = Self {
            services,
            activity,
            config,
            router: Router::new(),
            section: None,
            navigation: Rc::new(RefCell::new(VecDeque::new())),
            section_lifetime: Lifetime::new(),
            app_lifetime,
            theme,
            should_quit: false,
        };

        let first = if app.services.has_passcode() {
            SectionId::PasscodeCheck
        } else {
            SectionId::PasscodeCreate
        };
        app.show(first);
        app
    }

    pub fn current(&self) -> Option<SectionId> {
        self.section.as_ref().map(|section| section.id())
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn config(&self) -> LatchConfig {
        self.config.borrow().clone()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Breadcrumb shown in the header
    pub fn title(&self) -> Option<&'static str> {
        self.section.as_ref().map(|section| section.title())
    }

    /// Show `id`, pruning the history it declares stale
    pub fn show(&mut self, id: SectionId) {
        let section = create_section(id, self.services.clone());
        self.router.remove_from_stack(&section.remove_from_stack());
        self.router.push(id);
        self.install(section);
    }

    fn install(&mut self, mut section: Box<dyn Section>) {
        tracing::debug!("Showing section {:?}", section.id());

        // Old subscriptions go before the old section.
        self.section_lifetime.destroy();
        self.section = None;

        let queue = Rc::clone(&self.navigation);
        self.section_lifetime.add(
            section
                .section_show_other()
                .subscribe(move |id| queue.borrow_mut().push_back(Navigation::Show(*id))),
        );
        let queue = Rc::clone(&self.navigation);
        self.section_lifetime.add(
            section
                .section_show_back()
                .subscribe(move |_| queue.borrow_mut().push_back(Navigation::Back)),
        );

        section.set_inner_focus();
        section.show_finished();
        self.section = Some(section);
    }

    /// Pop the history; with nothing left, lock if there is something to
    /// lock, otherwise quit
    fn go_back(&mut self) {
        if let Some(id) = self.router.back() {
            tracing::debug!("Back to {:?}", id);
            let section = create_section(id, self.services.clone());
            self.install(section);
            return;
        }

        if self.services.has_passcode() && self.current() != Some(SectionId::PasscodeCheck) {
            tracing::info!("Leaving passcode settings, locking");
            self.router.clear();
            self.show(SectionId::PasscodeCheck);
        } else {
            tracing::debug!("History empty, quitting");
            self.should_quit = true;
        }
    }

    /// Apply navigation queued by section callbacks
    fn process_navigation(&mut self) {
        loop {
            let next = self.navigation.borrow_mut().pop_front();
            match next {
                Some(Navigation::Show(id)) => self.show(id),
                Some(Navigation::Back) => self.go_back(),
                None => break,
            }
            if self.should_quit {
                self.navigation.borrow_mut().clear();
                break;
            }
        }
    }

    /// Handle a key press
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        self.activity.touch();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if let Some(section) = self.section.as_mut() {
            section.handle_key(key.code);
        }
        self.process_navigation();
    }

    /// Drive section timers and the auto-lock check
    pub fn tick(&mut self, now: Instant) {
        if self.should_quit {
            return;
        }
        if let Some(section) = self.section.as_mut() {
            section.tick(now);
        }
        self.process_navigation();
        if self.should_quit {
            return;
        }
        self.check_auto_lock(now);
    }

    fn check_auto_lock(&mut self, now: Instant) {
        if !self.services.has_passcode() || self.current() == Some(SectionId::PasscodeCheck) {
            return;
        }

        let limit = Duration::from_secs(u64::from(self.services.settings.auto_lock()));
        if self.activity.idle_time_at(now) >= limit {
            tracing::info!("Auto-locking after {:?} without input", limit);
            self.router.clear();
            self.show(SectionId::PasscodeCheck);
        }
    }

    /// Run the application main loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut events = EventHandler::new(TICK_RATE);

        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, self))?;

            match events.next().await {
                Some(Ok(Event::Key(key))) => self.handle_key_event(key),
                Some(Ok(Event::Tick)) => self.tick(Instant::now()),
                Some(Ok(Event::Resize)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            }
        }

        Ok(())
    }
}
