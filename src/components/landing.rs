use indoc::indoc;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::components::{Component, ComponentContext};
use crate::config::CardConfig;
use crate::ui::{UiFrame, centered};

const ENVELOPE_ART: &str = indoc! {r"
    +------------------------------+
    |\                            /|
    | \                          / |
    |  \                        /  |
    |   \_________    _________/   |
    |            \  /              |
    |             <3               |
    |                              |
    +------------------------------+
"};

/// The closed envelope shown when the card first opens.
#[derive(Debug)]
pub struct LandingEnvelope {
    title: String,
    hint: String,
}

impl LandingEnvelope {
    pub fn new(config: &CardConfig) -> Self {
        Self {
            title: config.title.clone(),
            hint: config.landing_hint.clone(),
        }
    }

    fn art_size() -> (u16, u16) {
        let width = ENVELOPE_ART
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        (width as u16, ENVELOPE_ART.lines().count() as u16)
    }

    /// Clickable area of the envelope.
    pub fn envelope_rect(&self, area: Rect) -> Rect {
        let (width, height) = Self::art_size();
        centered(area, width, height)
    }
}

impl Component for LandingEnvelope {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let envelope = self.envelope_rect(area);
        let style = Style::default().fg(crate::theme::accent_soft());
        for (row, line) in ENVELOPE_ART.lines().enumerate() {
            frame.put_str(
                i32::from(envelope.x),
                i32::from(envelope.y) + row as i32,
                line,
                style,
            );
        }
        let title = Paragraph::new(self.title.as_str())
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(crate::theme::accent())
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(
            title,
            Rect::new(area.x, envelope.y.saturating_sub(2), area.width, 1),
        );
        let hint = Paragraph::new(self.hint.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(crate::theme::status_fg()));
        frame.render_widget(
            hint,
            Rect::new(area.x, envelope.bottom().saturating_add(1), area.width, 1),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_is_centered() {
        let landing = LandingEnvelope::new(&CardConfig::default());
        let area = Rect::new(0, 0, 100, 40);
        let rect = landing.envelope_rect(area);
        assert_eq!(rect.width, 32);
        assert_eq!(rect.height, 9);
        assert_eq!(rect.x, 34);
    }
}
