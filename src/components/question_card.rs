use std::time::Instant;

use indoc::indoc;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::components::{Component, ComponentContext, jitter};
use crate::config::CardConfig;
use crate::constants::SHAKE_DURATION;
use crate::geometry::{Bounds, CellMetrics, Point};
use crate::parallax::Transform2D;
use crate::ui::{UiFrame, centered};

const IMAGE_ART: &str = indoc! {"
     .:::.   .:::.
    :::::::.:::::::
    :::::::::::::::
    ':::::::::::::'
      ':::::::::'
        ':::::'
          ':'
"};

const CARD_WIDTH: u16 = 64;
const CARD_HEIGHT: u16 = 22;
const BUTTON_HEIGHT: u16 = 3;
const BUTTON_GAP: u16 = 6;
const MINI_HEART: &str = "◆";
const WIGGLE_PERIOD_MS: u128 = 50;

/// Mini heart anchors relative to the image's top-left corner, in cells.
const MINI_HEART_ANCHORS: [(i32, i32); 3] = [(-4, 1), (18, 2), (7, -1)];

pub const MINI_HEART_COUNT: usize = MINI_HEART_ANCHORS.len();

/// Per-frame state the card draws from.
#[derive(Debug, Clone, PartialEq)]
pub struct CardScene {
    pub growth: f64,
    /// Decline button position relative to the card interior, once it has
    /// left the button row.
    pub decline_origin: Option<Point>,
    pub image_highlighted: bool,
    pub mini_hearts: Vec<Transform2D>,
    pub shake_started: Option<Instant>,
    pub wiggling: bool,
}

impl Default for CardScene {
    fn default() -> Self {
        Self {
            growth: 1.0,
            decline_origin: None,
            image_highlighted: false,
            mini_hearts: Vec::new(),
            shake_started: None,
            wiggling: false,
        }
    }
}

/// Where everything on the question card sits. Cell rectangles for drawing,
/// unit-space bounds for the evasion geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLayout {
    pub card: Rect,
    /// Card interior; the decline button roams inside it.
    pub container: Rect,
    pub question: Rect,
    pub image: Option<Rect>,
    pub accept_base: Rect,
    pub decline_base: Rect,
    /// Accept button after its growth is applied.
    pub accept: Bounds,
    pub decline: Bounds,
}

#[derive(Debug)]
pub struct QuestionCard {
    question: String,
    accept_label: String,
    decline_label: String,
    show_image: bool,
    scene: CardScene,
}

impl QuestionCard {
    pub fn new(config: &CardConfig) -> Self {
        Self {
            question: config.question.clone(),
            accept_label: config.accept_label.clone(),
            decline_label: config.decline_label.clone(),
            show_image: config.show_image,
            scene: CardScene::default(),
        }
    }

    pub fn set_scene(&mut self, scene: CardScene) {
        self.scene = scene;
    }

    pub fn scene(&self) -> &CardScene {
        &self.scene
    }

    pub fn has_image(&self) -> bool {
        self.show_image
    }

    fn image_size() -> (u16, u16) {
        let width = IMAGE_ART
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        (width as u16, IMAGE_ART.lines().count() as u16)
    }

    fn button_width(label: &str) -> u16 {
        label.chars().count() as u16 + 6
    }

    pub fn layout(&self, area: Rect, metrics: CellMetrics) -> CardLayout {
        let card = centered(area, CARD_WIDTH, CARD_HEIGHT);
        let container = Rect {
            x: card.x.saturating_add(1),
            y: card.y.saturating_add(1),
            width: card.width.saturating_sub(2),
            height: card.height.saturating_sub(2),
        };
        let question = Rect {
            x: container.x,
            y: container.y.saturating_add(1).min(container.bottom()),
            width: container.width,
            height: 1.min(container.height),
        };
        let image = self.show_image.then(|| {
            let (width, height) = Self::image_size();
            let slot = Rect {
                x: container.x,
                y: question.bottom().saturating_add(1),
                width: container.width,
                height,
            };
            centered(slot, width, height)
        });

        let accept_width = Self::button_width(&self.accept_label);
        let decline_width = Self::button_width(&self.decline_label);
        let row_width = accept_width + BUTTON_GAP + decline_width;
        let row_y = container
            .bottom()
            .saturating_sub(BUTTON_HEIGHT + 2)
            .max(container.y);
        let row_x = container
            .x
            .saturating_add(container.width.saturating_sub(row_width) / 2);
        let accept_base = Rect::new(row_x, row_y, accept_width, BUTTON_HEIGHT);
        let decline_base = Rect::new(
            row_x.saturating_add(accept_width + BUTTON_GAP),
            row_y,
            decline_width,
            BUTTON_HEIGHT,
        );

        let accept = metrics
            .rect_to_bounds(accept_base)
            .scaled_about_center(self.scene.growth);
        let decline_home = metrics.rect_to_bounds(decline_base);
        let decline = match self.scene.decline_origin {
            Some(origin) => {
                let container_bounds = metrics.rect_to_bounds(container);
                Bounds::new(
                    container_bounds.x + origin.x,
                    container_bounds.y + origin.y,
                    decline_home.width,
                    decline_home.height,
                )
            }
            None => decline_home,
        };

        CardLayout {
            card,
            container,
            question,
            image,
            accept_base,
            decline_base,
            accept,
            decline,
        }
    }

    fn render_image(&self, frame: &mut UiFrame<'_>, image: Rect, ctx: &ComponentContext) {
        let metrics = ctx.metrics();
        let (style, shift) = if self.scene.image_highlighted {
            (
                Style::default()
                    .fg(crate::theme::glow())
                    .add_modifier(Modifier::BOLD),
                -1,
            )
        } else {
            (Style::default().fg(crate::theme::accent()), 0)
        };
        for (row, line) in IMAGE_ART.lines().enumerate() {
            frame.put_str(
                i32::from(image.x) + shift,
                i32::from(image.y) + row as i32,
                line,
                style,
            );
        }
        let heart_style = Style::default().fg(crate::theme::accent_soft());
        for (transform, (ax, ay)) in self.scene.mini_hearts.iter().zip(MINI_HEART_ANCHORS) {
            let x = i32::from(image.x) + ax + metrics.columns(transform.translate.x);
            let y = i32::from(image.y) + ay + metrics.rows(transform.translate.y);
            frame.put_str(x, y, MINI_HEART, heart_style);
        }
    }

    fn render_button(frame: &mut UiFrame<'_>, rect: Rect, label: &str, style: Style) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        let paragraph = Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::bordered().border_type(BorderType::Rounded));
        frame.render_widget(paragraph, rect);
    }
}

fn shift(rect: Rect, dx: i32, clip: Rect) -> Rect {
    let x = (i32::from(rect.x) + dx).clamp(i32::from(clip.x), i32::from(clip.right()));
    Rect { x: x as u16, ..rect }.intersection(clip)
}

impl Component for QuestionCard {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let metrics = ctx.metrics();
        let layout = self.layout(area, metrics);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(crate::theme::card_border()));
        frame.render_widget(block, layout.card);

        let question = Paragraph::new(self.question.as_str())
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(crate::theme::card_fg())
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(question, layout.question);

        if let Some(image) = layout.image {
            self.render_image(frame, image, ctx);
        }

        let shake = self
            .scene
            .shake_started
            .map(|started| jitter(ctx.now().saturating_duration_since(started), SHAKE_DURATION))
            .unwrap_or(0);
        let accept = shift(metrics.bounds_to_rect(layout.accept, area), shake, area);
        Self::render_button(
            frame,
            accept,
            &self.accept_label,
            Style::default()
                .fg(crate::theme::accept_fg())
                .bg(crate::theme::accept_bg())
                .add_modifier(Modifier::BOLD),
        );

        let wiggle = if self.scene.wiggling {
            let phase = ctx.elapsed().as_millis() / WIGGLE_PERIOD_MS;
            if phase % 2 == 0 { -1 } else { 1 }
        } else {
            0
        };
        let decline = shift(
            metrics.bounds_to_rect(layout.decline, layout.container),
            wiggle,
            layout.container,
        );
        Self::render_button(
            frame,
            decline,
            &self.decline_label,
            Style::default()
                .fg(crate::theme::decline_fg())
                .bg(crate::theme::decline_bg()),
        );
    }
}
