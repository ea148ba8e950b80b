//! UI rendering

pub mod components;
pub mod layout;
pub mod theme;

pub use theme::Theme;

use ratatui::prelude::*;

use crate::app::App;
use layout::{render_footer, render_header, split_bottom, ScreenLayout};

/// Main render function: header, current section, footer
pub fn render(frame: &mut Frame, app: &mut App) {
    let screen = ScreenLayout::new(frame.area());
    render_header(frame, screen.header, app.title(), &app.theme);

    let Some(section) = app.section.as_mut() else {
        return;
    };

    match section.create_pinned_to_bottom(screen.content) {
        Some(bottom) => {
            let (rest, _) = split_bottom(screen.content, bottom.height);
            section.render(frame, rest, &app.theme);
            section.render_pinned_to_bottom(frame, bottom, &app.theme);
        }
        None => section.render(frame, screen.content, &app.theme),
    }

    render_footer(frame, screen.footer, section.hints(), &app.theme);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::LatchConfig;
    use crate::sections::test_support::CountingStore;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_render_current_section() {
        let mut app = App::from_parts(CountingStore::default(), LatchConfig::default(), None);
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("LATCH"));
        assert!(screen.contains("Create Local Passcode"));
        assert!(screen.contains("[Esc] Back"));
    }
}
