use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::components::{Component, ComponentContext};
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

/// Single line of key hints along the bottom of the screen.
pub struct StatusBar {
    left: String,
    right: String,
    style: Style,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            left: String::new(),
            right: String::new(),
            style: Style::default().fg(crate::theme::status_fg()),
        }
    }

    pub fn set_left<T: Into<String>>(&mut self, value: T) {
        self.left = value.into();
    }

    pub fn set_right<T: Into<String>>(&mut self, value: T) {
        self.right = value.into();
    }

    pub fn left(&self) -> &str {
        &self.left
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let y = area.bottom().saturating_sub(1);
        let width = area.width as usize;
        let buffer = frame.buffer_mut();

        let left = truncate_to_width(&self.left, width);
        safe_set_string(buffer, area, area.x, y, &left, self.style);

        let right_width = self.right.chars().count();
        if right_width > 0 && right_width + left.chars().count() < width {
            let start_x = area.x.saturating_add((width - right_width) as u16);
            safe_set_string(buffer, area, start_x, y, &self.right, self.style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CellMetrics;
    use ratatui::buffer::Buffer;
    use std::time::Instant;

    #[test]
    fn renders_left_and_right_on_last_row() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        let now = Instant::now();
        let ctx = ComponentContext::new(now, now, CellMetrics::default());
        let mut bar = StatusBar::new();
        bar.set_left("q quit");
        bar.set_right("v1");
        bar.render(&mut ui, area, &ctx);
        assert_eq!(buf.cell((0, 2)).unwrap().symbol(), "q");
        assert_eq!(buf.cell((18, 2)).unwrap().symbol(), "v");
    }
}
