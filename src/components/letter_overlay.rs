use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::components::{Component, ComponentContext};
use crate::geometry::rect_contains;
use crate::modals::PanelPart;
use crate::ui::UiFrame;

const CLOSE_CONTROL: &str = "[x]";
/// Each stacked letter is nudged by this many cells so the ones beneath stay
/// visible.
const CASCADE_STEP: u16 = 2;

/// One open letter: a dimmed backdrop over the page with the letter on top.
#[derive(Debug, Clone)]
pub struct LetterOverlay {
    title: String,
    body: String,
    width: u16,
    height: u16,
    depth: u16,
}

impl LetterOverlay {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        let body = body.into();
        let height = body.lines().count() as u16 + 6;
        Self {
            title: title.into(),
            body,
            width: 56,
            height,
            depth: 0,
        }
    }

    /// Position in the stack of open letters, 0 at the bottom.
    pub fn set_depth(&mut self, depth: u16) {
        self.depth = depth;
    }

    /// Clamp letter size to the available area to avoid drawing outside the
    /// buffer on small terminals.
    pub fn rect_for(&self, area: Rect) -> Rect {
        let mut width = area.width.min(self.width).max(1);
        let mut height = area.height.min(self.height).max(1);
        if area.width >= 24 {
            width = width.max(24);
        }
        if area.height >= 5 {
            height = height.max(5);
        }
        let offset = self.depth.saturating_mul(CASCADE_STEP);
        let x = area
            .x
            .saturating_add(area.width.saturating_sub(width) / 2)
            .saturating_add(offset)
            .min(area.right().saturating_sub(width));
        let y = area
            .y
            .saturating_add(area.height.saturating_sub(height) / 2)
            .saturating_add(offset / 2)
            .min(area.bottom().saturating_sub(height));
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    fn close_rect(&self, area: Rect) -> Rect {
        let rect = self.rect_for(area);
        let width = CLOSE_CONTROL.chars().count() as u16;
        Rect {
            x: rect.right().saturating_sub(width + 1),
            y: rect.y,
            width,
            height: 1,
        }
    }

    /// Which part of this letter a click at `(column, row)` lands on.
    pub fn hit_test(&self, area: Rect, column: u16, row: u16) -> PanelPart {
        if rect_contains(self.close_rect(area), column, row) {
            PanelPart::CloseControl
        } else if rect_contains(self.rect_for(area), column, row) {
            PanelPart::Body
        } else {
            PanelPart::Backdrop
        }
    }
}

impl Component for LetterOverlay {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        frame.dim(area);
        let rect = self.rect_for(area);
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .title(self.title.as_str())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(crate::theme::accent_soft()));
        let paragraph = Paragraph::new(self.body.as_str())
            .style(
                Style::default()
                    .fg(crate::theme::letter_fg())
                    .bg(crate::theme::letter_bg()),
            )
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, rect);
        let close = self.close_rect(area);
        frame.put_str(
            i32::from(close.x),
            i32::from(close.y),
            CLOSE_CONTROL,
            Style::default()
                .fg(crate::theme::letter_close())
                .add_modifier(Modifier::BOLD),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_for_clamps_sizes() {
        let letter = LetterOverlay::new("t", "body");
        let r = letter.rect_for(Rect::new(0, 0, 10, 2));
        assert!(r.width >= 1 && r.width <= 10);
        assert!(r.height >= 1 && r.height <= 2);

        let r2 = letter.rect_for(Rect::new(0, 0, 80, 10));
        assert!(r2.width >= 24);
        assert!(r2.height >= 5);
    }

    #[test]
    fn hit_test_distinguishes_parts() {
        let letter = LetterOverlay::new("Title", "one\ntwo");
        let area = Rect::new(0, 0, 100, 40);
        let rect = letter.rect_for(area);
        let close = letter.close_rect(area);
        assert_eq!(letter.hit_test(area, close.x, close.y), PanelPart::CloseControl);
        assert_eq!(
            letter.hit_test(area, rect.x + 2, rect.y + 2),
            PanelPart::Body
        );
        assert_eq!(letter.hit_test(area, 0, 0), PanelPart::Backdrop);
    }

    #[test]
    fn stacked_letters_cascade() {
        let mut letter = LetterOverlay::new("Title", "body");
        let area = Rect::new(0, 0, 100, 40);
        let bottom = letter.rect_for(area);
        letter.set_depth(2);
        let top = letter.rect_for(area);
        assert_eq!(top.x, bottom.x + 4);
        assert_eq!(top.y, bottom.y + 2);
    }
}
