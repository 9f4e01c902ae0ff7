use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::components::{Component, ComponentContext};
use crate::config::CardConfig;
use crate::ui::{UiFrame, centered};

const ENVELOPE_HEIGHT: u16 = 3;
const ENVELOPE_GAP: u16 = 2;

/// Page shown after the card is accepted, with one envelope per letter.
#[derive(Debug)]
pub struct AcceptancePage {
    title: String,
    message: String,
    envelopes: Vec<(String, String)>,
}

impl AcceptancePage {
    pub fn new(config: &CardConfig) -> Self {
        Self {
            title: config.acceptance_title.clone(),
            message: config.acceptance_message.clone(),
            envelopes: config
                .letters
                .iter()
                .map(|letter| (letter.key.clone(), letter.label.clone()))
                .collect(),
        }
    }

    fn envelope_width(label: &str) -> u16 {
        label.chars().count() as u16 + 6
    }

    fn message_rect(area: Rect) -> Rect {
        let width = area.width.saturating_sub(4).min(60);
        let rect = centered(area, width, 7);
        Rect {
            y: rect.y.saturating_sub(ENVELOPE_HEIGHT),
            ..rect
        }
    }

    /// Envelope triggers in a centered row under the message, keyed by the
    /// letter they open.
    pub fn envelope_rects(&self, area: Rect) -> Vec<(String, Rect)> {
        let total: u16 = self
            .envelopes
            .iter()
            .map(|(_, label)| Self::envelope_width(label))
            .sum::<u16>()
            + ENVELOPE_GAP * self.envelopes.len().saturating_sub(1) as u16;
        let y = Self::message_rect(area).bottom().saturating_add(1);
        let mut x = area.x.saturating_add(area.width.saturating_sub(total) / 2);
        let mut rects = Vec::with_capacity(self.envelopes.len());
        for (key, label) in &self.envelopes {
            let width = Self::envelope_width(label);
            let rect = Rect::new(x, y, width, ENVELOPE_HEIGHT).intersection(area);
            rects.push((key.clone(), rect));
            x = x.saturating_add(width + ENVELOPE_GAP);
        }
        rects
    }
}

impl Component for AcceptancePage {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let message_rect = Self::message_rect(area);
        let title = Paragraph::new(self.title.as_str())
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(crate::theme::accent())
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(title, Rect { height: 1, ..message_rect });
        let message = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(crate::theme::card_fg()));
        frame.render_widget(
            message,
            Rect {
                y: message_rect.y.saturating_add(2),
                height: message_rect.height.saturating_sub(2),
                ..message_rect
            },
        );

        let labels: Vec<&str> = self.envelopes.iter().map(|(_, l)| l.as_str()).collect();
        for ((_, rect), label) in self.envelope_rects(area).into_iter().zip(labels) {
            let envelope = Paragraph::new(format!("✉ {label}"))
                .alignment(Alignment::Center)
                .style(Style::default().fg(crate::theme::accent_soft()))
                .block(Block::bordered().border_type(BorderType::Rounded));
            frame.render_widget(envelope, rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_envelope_per_letter_without_overlap() {
        let page = AcceptancePage::new(&CardConfig::default());
        let rects = page.envelope_rects(Rect::new(0, 0, 100, 30));
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0].0, "memories");
        for pair in rects.windows(2) {
            assert!(pair[0].1.right() < pair[1].1.x);
        }
    }
}
