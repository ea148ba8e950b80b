//! Shaded divider strip with optional edges

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::ui::Theme;

/// Divider strip drawing a top and bottom edge unless told to skip them
///
/// Two dividers stacked on each other skip the shared edge so the seam does
/// not render twice.
#[derive(Clone, Debug, Default)]
pub struct Divider {
    skip_edges: Borders,
}

impl Divider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip (or restore) one edge; only `TOP` and `BOTTOM` are drawn at all
    pub fn skip_edge(&mut self, edge: Borders, skip: bool) {
        if skip {
            self.skip_edges.insert(edge);
        } else {
            self.skip_edges.remove(edge);
        }
    }

    pub fn skips(&self, edge: Borders) -> bool {
        self.skip_edges.contains(edge)
    }

    /// Edges that will be drawn
    pub fn edges(&self) -> Borders {
        (Borders::TOP | Borders::BOTTOM).difference(self.skip_edges)
    }

    /// Render the strip with optional text inside
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, text: Option<&str>) {
        let block = Block::default()
            .borders(self.edges())
            .border_style(theme.divider())
            .style(theme.divider());

        match text {
            Some(text) => {
                let paragraph = Paragraph::new(text)
                    .style(theme.text_muted().bg(theme.divider_fill))
                    .wrap(Wrap { trim: true })
                    .block(block.padding(Padding::horizontal(2)));
                frame.render_widget(paragraph, area);
            }
            None => frame.render_widget(block, area),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_edges() {
        let mut divider = Divider::new();
        assert_eq!(divider.edges(), Borders::TOP | Borders::BOTTOM);

        divider.skip_edge(Borders::BOTTOM, true);
        assert_eq!(divider.edges(), Borders::TOP);
        assert!(divider.skips(Borders::BOTTOM));

        divider.skip_edge(Borders::BOTTOM, false);
        divider.skip_edge(Borders::TOP, true);
        assert_eq!(divider.edges(), Borders::BOTTOM);
    }
}
