//! Padlock icon with a one-shot closing animation

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::ui::Theme;

/// Animation frames, open to closed; every frame has the same height
const FRAMES: &[[&str; 5]] = &[
    [
        "   ╭───╮   ",
        "   │   │   ",
        "   │       ",
        " ┌─┴─────┐ ",
        " └───────┘ ",
    ],
    [
        "           ",
        "   ╭───╮   ",
        "   │   │   ",
        " ┌─┴───┴─┐ ",
        " └───────┘ ",
    ],
    [
        "           ",
        "   ╭───╮   ",
        " ┌─┴───┴─┐ ",
        " │   ●   │ ",
        " └───────┘ ",
    ],
];

/// Height of the icon in rows
pub const ICON_HEIGHT: u16 = 5;

/// Ticks each frame stays on screen
const TICKS_PER_FRAME: u8 = 2;

/// Lock icon component
pub struct LockIcon {
    frame: usize,
    playing: bool,
    ticks_in_frame: u8,
}

impl LockIcon {
    pub fn new() -> Self {
        Self {
            frame: 0,
            playing: false,
            ticks_in_frame: 0,
        }
    }

    /// Play the closing animation once from the start
    pub fn animate_once(&mut self) {
        self.frame = 0;
        self.ticks_in_frame = 0;
        self.playing = true;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Advance animation frame
    pub fn tick(&mut self) {
        if !self.playing {
            return;
        }
        self.ticks_in_frame += 1;
        if self.ticks_in_frame < TICKS_PER_FRAME {
            return;
        }
        self.ticks_in_frame = 0;
        if self.frame + 1 < FRAMES.len() {
            self.frame += 1;
        }
        if self.frame + 1 == FRAMES.len() {
            self.playing = false;
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let lines: Vec<Line> = FRAMES[self.frame]
            .iter()
            .map(|line| Line::from(*line))
            .collect();
        let icon = Paragraph::new(lines)
            .style(theme.text_highlight())
            .alignment(Alignment::Center);
        frame.render_widget(icon, area);
    }
}

impl Default for LockIcon {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_until_animated() {
        let mut icon = LockIcon::new();
        for _ in 0..10 {
            icon.tick();
        }
        assert_eq!(icon.frame(), 0);
        assert!(!icon.is_playing());
    }

    #[test]
    fn test_plays_once_and_stops_closed() {
        let mut icon = LockIcon::new();
        icon.animate_once();
        assert!(icon.is_playing());

        for _ in 0..20 {
            icon.tick();
        }
        assert_eq!(icon.frame(), FRAMES.len() - 1);
        assert!(!icon.is_playing());
    }
}
