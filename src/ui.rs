//! UiFrame: a thin wrapper around `ratatui::Frame` that clamps drawing to the
//! visible area.
//!
//! Card elements move around freely (the decline button, drifting hearts,
//! burst particles) and their rectangles regularly leave the screen. Routing
//! every draw through `UiFrame` clips those writes instead of letting them
//! panic inside the buffer.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer, for rendering
    /// into offscreen buffers in tests.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Write `text` at a signed position, dropping whatever falls outside the
    /// frame.
    pub fn put_str(&mut self, x: i32, y: i32, text: &str, style: Style) {
        let area = self.area;
        if y < i32::from(area.y) || y >= i32::from(area.bottom()) {
            return;
        }
        let skip = (i32::from(area.x) - x).max(0) as usize;
        let start = x.max(i32::from(area.x)) as u16;
        let visible: String = text.chars().skip(skip).collect();
        safe_set_string(self.buffer, area, start, y as u16, &visible, style);
    }

    /// Dim every cell of `area` (clipped to the frame).
    pub fn dim(&mut self, area: Rect) {
        let Some(area) = self.clip_rect(area) else {
            return;
        };
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_style(dim_style);
                }
            }
        }
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    let bounds = bounds.intersection(buffer.area);
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    if x < bounds.x || x >= bounds.right() || y < bounds.y || y >= bounds.bottom() {
        return;
    }
    let available = bounds.right().saturating_sub(x);
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

/// Rectangle of `width`x`height` centered in `area`, clamped to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x.saturating_add(area.width.saturating_sub(width) / 2),
        y: area.y.saturating_add(area.height.saturating_sub(height) / 2),
        width,
        height,
    }
}
