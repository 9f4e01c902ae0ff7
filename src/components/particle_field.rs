use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::components::{Component, ComponentContext};
use crate::geometry::Point;
use crate::particles::{AmbientParticle, ParticleField};
use crate::ui::UiFrame;

fn ambient_glyph(particle: &AmbientParticle) -> &'static str {
    match particle.size {
        s if s < 16.0 => "·",
        s if s < 23.0 => "♡",
        _ => "♥",
    }
}

fn burst_glyph(opacity: f64) -> Option<&'static str> {
    match opacity {
        o if o > 0.6 => Some("♥"),
        o if o > 0.3 => Some("♡"),
        o if o > 0.05 => Some("·"),
        _ => None,
    }
}

impl ParticleField {
    /// Ambient hearts rise from below the bottom edge to above the top edge
    /// once per cycle.
    pub fn render_ambient(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        let metrics = ctx.metrics();
        let bounds = metrics.rect_to_bounds(area);
        for particle in self.ambient() {
            let Some(progress) = particle.progress(ctx.elapsed()) else {
                continue;
            };
            let travel = bounds.height + particle.size * 2.0;
            let y = bounds.bottom() + particle.size - progress * travel;
            let x = bounds.x + bounds.width * particle.left_pct / 100.0;
            let style = Style::default().fg(crate::theme::rgb_to_color(particle.color));
            frame.put_str(
                metrics.columns(x),
                metrics.rows(y),
                ambient_glyph(particle),
                style,
            );
        }
    }

    /// Burst hearts fly out from the center of `area`.
    pub fn render_bursts(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        let metrics = ctx.metrics();
        let origin = metrics.rect_to_bounds(area).center();
        let style = Style::default()
            .fg(crate::theme::accent())
            .add_modifier(Modifier::BOLD);
        for particle in self.bursts() {
            let Some(glyph) = burst_glyph(particle.opacity_at(ctx.now())) else {
                continue;
            };
            let offset = particle.offset_at(ctx.now());
            let at = Point::new(origin.x + offset.x, origin.y + offset.y);
            frame.put_str(metrics.columns(at.x), metrics.rows(at.y), glyph, style);
        }
    }
}

impl Component for ParticleField {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.render_ambient(frame, area, ctx);
        self.render_bursts(frame, area, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CellMetrics;
    use crate::timers::TimerQueue;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::buffer::Buffer;
    use std::time::{Duration, Instant};

    #[test]
    fn fresh_burst_draws_hearts_and_faded_burst_draws_nothing() {
        let area = Rect::new(0, 0, 120, 60);
        let t0 = Instant::now();
        let ctx = ComponentContext::new(t0, t0, CellMetrics::default());
        let mut field = ParticleField::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut timers = TimerQueue::new();
        field.spawn_burst(5, &mut rng, &mut timers, t0);

        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        field.render_bursts(&mut ui, area, &ctx);
        assert!(buf.content.iter().any(|cell| cell.symbol() == "♥"));

        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        field.render_bursts(&mut ui, area, &ctx.at(t0 + Duration::from_millis(900)));
        assert!(buf.content.iter().all(|cell| cell.symbol() == " "));
    }

    #[test]
    fn glyphs_follow_size_and_opacity() {
        assert_eq!(burst_glyph(1.0), Some("♥"));
        assert_eq!(burst_glyph(0.4), Some("♡"));
        assert_eq!(burst_glyph(0.0), None);
    }
}
