//! The card session: every piece of interactive state plus the event
//! routing between them.
//!
//! `CardApp` never reads the clock or the terminal itself. Callers hand it
//! events and `Instant`s, which keeps the whole interaction scriptable from
//! tests.

use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::layout::Rect;

use crate::components::question_card::MINI_HEART_COUNT;
use crate::components::{
    AcceptancePage, CardLayout, CardScene, Component, ComponentContext, LandingEnvelope,
    LetterOverlay, QuestionCard, StatusBar,
};
use crate::config::CardConfig;
use crate::evasion::{EvasionController, EvasionGeometry, Trigger};
use crate::geometry::{CellMetrics, rect_contains};
use crate::haptics::{Haptics, NoHaptics};
use crate::input_mode::InputMode;
use crate::modals::{ModalSet, PanelRef, panel_id};
use crate::pages::{ACCEPTANCE_PAGE, LANDING_PAGE, PageSet, QUESTION_PAGE};
use crate::parallax::ParallaxLayers;
use crate::particles::ParticleField;
use crate::timers::{CardTimer, TimerQueue};
use crate::ui::UiFrame;

/// Startup decisions made outside the card.
#[derive(Debug, Clone, Copy)]
pub struct CardOptions {
    pub input_mode: InputMode,
    /// Fixed seed for every random choice; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub metrics: CellMetrics,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            input_mode: InputMode::hover(),
            seed: None,
            metrics: CellMetrics::default(),
        }
    }
}

/// What the pointer was over at the last motion event.
#[derive(Debug, Default, Clone, Copy)]
struct HoverState {
    accept: bool,
    decline: bool,
    image: bool,
}

pub struct CardApp {
    config: CardConfig,
    pages: PageSet,
    modals: ModalSet,
    evasion: EvasionController,
    parallax: ParallaxLayers,
    particles: ParticleField,
    timers: TimerQueue<CardTimer>,
    rng: StdRng,
    haptics: Box<dyn Haptics>,
    metrics: CellMetrics,
    viewport: Rect,
    started_at: Instant,
    hover: HoverState,
    quit: bool,
    landing: LandingEnvelope,
    card: QuestionCard,
    acceptance: AcceptancePage,
    letters: Vec<(String, LetterOverlay)>,
    status: StatusBar,
}

impl CardApp {
    pub fn new(config: CardConfig, options: CardOptions, now: Instant) -> Self {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut particles = ParticleField::new();
        particles.spawn_ambient(config.ambient_particles, &mut rng);

        let letters = config
            .letters
            .iter()
            .map(|letter| {
                (
                    letter.key.clone(),
                    LetterOverlay::new(letter.title.as_str(), letter.body.as_str()),
                )
            })
            .collect();

        tracing::info!(
            letters = config.letters.len(),
            ambient = config.ambient_particles,
            hover = options.input_mode.supports_hover(),
            "card opened"
        );

        Self {
            modals: ModalSet::new(config.letters.iter().map(|letter| letter.key.clone())),
            evasion: EvasionController::new(options.input_mode),
            parallax: ParallaxLayers::new(MINI_HEART_COUNT),
            particles,
            timers: TimerQueue::new(),
            rng,
            haptics: Box::new(NoHaptics),
            metrics: options.metrics,
            viewport: Rect::default(),
            started_at: now,
            hover: HoverState::default(),
            quit: false,
            landing: LandingEnvelope::new(&config),
            card: QuestionCard::new(&config),
            acceptance: AcceptancePage::new(&config),
            letters,
            status: StatusBar::new(),
            pages: PageSet::card(),
            config,
        }
    }

    pub fn set_haptics(&mut self, haptics: Box<dyn Haptics>) {
        self.haptics = haptics;
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn pages(&self) -> &PageSet {
        &self.pages
    }

    pub fn modals(&self) -> &ModalSet {
        &self.modals
    }

    pub fn evasion(&self) -> &EvasionController {
        &self.evasion
    }

    pub fn parallax(&self) -> &ParallaxLayers {
        &self.parallax
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn timers(&self) -> &TimerQueue<CardTimer> {
        &self.timers
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn image_highlighted(&self) -> bool {
        self.hover.accept && self.card.has_image()
    }

    /// Everything above the status bar.
    pub fn content_area(&self) -> Rect {
        Rect {
            height: self.viewport.height.saturating_sub(1),
            ..self.viewport
        }
    }

    /// Question card geometry for the current state.
    pub fn card_layout(&mut self) -> CardLayout {
        self.sync_card();
        self.card.layout(self.content_area(), self.metrics)
    }

    pub fn landing_envelope(&self) -> Rect {
        self.landing.envelope_rect(self.content_area())
    }

    pub fn acceptance_envelopes(&self) -> Vec<(String, Rect)> {
        self.acceptance.envelope_rects(self.content_area())
    }

    /// Where the letter `key` is drawn, if it is open.
    pub fn letter_rect(&self, key: &str) -> Option<Rect> {
        let depth = self.modals.open_keys().position(|open| open == key)?;
        let mut letter = self.letter(key)?.clone();
        letter.set_depth(depth as u16);
        Some(letter.rect_for(self.content_area()))
    }

    fn letter(&self, key: &str) -> Option<&LetterOverlay> {
        self.letters
            .iter()
            .find(|(letter_key, _)| letter_key == key)
            .map(|(_, letter)| letter)
    }

    fn sync_card(&mut self) {
        self.card.set_scene(CardScene {
            growth: self.evasion.growth().value(),
            decline_origin: self.evasion.decline_origin(),
            image_highlighted: self.image_highlighted(),
            mini_hearts: self.parallax.transforms().to_vec(),
            shake_started: self.evasion.shake_started(),
            wiggling: self.evasion.wiggling(),
        });
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::Resize(width, height) => {
                self.set_viewport(Rect::new(0, 0, *width, *height));
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.modals.close_all();
            }
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            KeyCode::Enter if self.pages.is_visible(LANDING_PAGE) => {
                self.pages.show(QUESTION_PAGE);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if self.pages.is_visible(QUESTION_PAGE) {
                    self.pointer_moved(mouse.column, mouse.row, now);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row, now),
            _ => {}
        }
    }

    fn pointer_moved(&mut self, column: u16, row: u16, now: Instant) {
        let pointer = self.metrics.pointer(column, row);
        let layout = self.card_layout();

        if let Some(image) = layout.image {
            let region = self.metrics.rect_to_bounds(image);
            if region.contains(pointer) {
                self.parallax.on_pointer_move(&region, pointer);
                self.hover.image = true;
            } else if self.hover.image {
                self.parallax.on_pointer_leave();
                self.hover.image = false;
            }
        }

        let over_accept = layout.accept.contains(pointer);
        if over_accept != self.hover.accept {
            self.hover.accept = over_accept;
            tracing::trace!(over_accept, "accept hover changed");
        }

        let geometry = EvasionGeometry {
            container: self.metrics.rect_to_bounds(layout.container),
            target: layout.decline,
            safe: layout.accept,
        };
        let over_decline = layout.decline.contains(pointer);
        let entered = over_decline && !self.hover.decline;
        self.hover.decline = over_decline;

        let mut moved = false;
        if entered {
            moved = self.trigger(Trigger::PointerEnter, &geometry, now);
        }
        if !moved && rect_contains(layout.card, column, row) {
            moved = self.trigger(Trigger::PointerMove(pointer), &geometry, now);
        }
        if moved {
            self.hover.decline = false;
        }
    }

    fn trigger(&mut self, trigger: Trigger, geometry: &EvasionGeometry, now: Instant) -> bool {
        self.evasion
            .handle_trigger(trigger, geometry, &mut self.rng, &mut self.timers, now)
            .is_some()
    }

    fn click(&mut self, column: u16, row: u16, now: Instant) {
        // Open letters sit above the page and swallow every click.
        if let Some(key) = self.modals.topmost().map(str::to_owned) {
            let depth = self.modals.open_keys().count().saturating_sub(1) as u16;
            let Some(mut letter) = self.letter(&key).cloned() else {
                return;
            };
            letter.set_depth(depth);
            let part = letter.hit_test(self.content_area(), column, row);
            tracing::trace!(?part, key, "letter clicked");
            self.modals.handle_click(&PanelRef::new(panel_id(&key), part));
            return;
        }

        match self.pages.visible() {
            Some(LANDING_PAGE) => {
                if rect_contains(self.landing_envelope(), column, row) {
                    self.pages.show(QUESTION_PAGE);
                }
            }
            Some(QUESTION_PAGE) => {
                let pointer = self.metrics.pointer(column, row);
                let layout = self.card_layout();
                if layout.accept.contains(pointer) {
                    self.accept(now);
                } else if layout.decline.contains(pointer) {
                    self.evasion
                        .tap_decline(self.haptics.as_mut(), &mut self.timers, now);
                }
            }
            Some(ACCEPTANCE_PAGE) => {
                let hit = self
                    .acceptance_envelopes()
                    .into_iter()
                    .find(|(_, rect)| rect_contains(*rect, column, row));
                if let Some((key, _)) = hit {
                    self.open_letter(&key);
                }
            }
            _ => {}
        }
    }

    /// Show the letter for envelope `key` on top of any already open.
    pub fn open_letter(&mut self, key: &str) -> bool {
        self.modals.open(key)
    }

    /// The accept button was pressed.
    pub fn accept(&mut self, now: Instant) {
        self.particles.spawn_burst(
            self.config.burst_particles,
            &mut self.rng,
            &mut self.timers,
            now,
        );
        self.pages.show(ACCEPTANCE_PAGE);
        self.evasion.accept();
        self.hover = HoverState::default();
        self.parallax.on_pointer_leave();
    }

    /// Fire every timer that is due at `now`.
    pub fn tick(&mut self, now: Instant) {
        for timer in self.timers.drain_due(now) {
            match timer {
                CardTimer::ReleaseRelocationGuard => self.evasion.release_guard(),
                CardTimer::ClearWiggle => self.evasion.clear_wiggle(),
                CardTimer::RemoveBurstParticle(id) => {
                    self.particles.remove_burst(id);
                }
            }
        }
    }

    fn update_status(&mut self) {
        let hint = match self.pages.visible() {
            Some(LANDING_PAGE) => "click the envelope or press Enter · q quit",
            Some(QUESTION_PAGE) => "q quit",
            Some(ACCEPTANCE_PAGE) if self.modals.any_open() => {
                "click outside or [x] to close · Esc close all · q quit"
            }
            Some(ACCEPTANCE_PAGE) => "click an envelope · q quit",
            _ => "q quit",
        };
        self.status.set_left(hint);
        let mode = if self.evasion.input_mode().supports_hover() {
            "hover"
        } else {
            "touch"
        };
        self.status.set_right(mode);
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, now: Instant) {
        let area = frame.area();
        self.viewport = area;
        let content = self.content_area();
        let ctx = ComponentContext::new(now, self.started_at, self.metrics);

        self.particles.render_ambient(frame, content, &ctx);
        match self.pages.visible() {
            Some(LANDING_PAGE) => self.landing.render(frame, content, &ctx),
            Some(QUESTION_PAGE) => {
                self.sync_card();
                self.card.render(frame, content, &ctx);
            }
            Some(ACCEPTANCE_PAGE) => self.acceptance.render(frame, content, &ctx),
            _ => {}
        }

        let open: Vec<String> = self.modals.open_keys().map(str::to_owned).collect();
        for (depth, key) in open.iter().enumerate() {
            if let Some((_, letter)) = self.letters.iter_mut().find(|(k, _)| k == key) {
                letter.set_depth(depth as u16);
                letter.render(frame, content, &ctx);
            }
        }

        self.particles.render_bursts(frame, area, &ctx);
        self.update_status();
        self.status.render(frame, area, &ctx);
    }
}
