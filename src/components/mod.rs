use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod acceptance;
pub mod landing;
pub mod letter_overlay;
pub mod particle_field;
pub mod question_card;
pub mod status_bar;

pub use acceptance::AcceptancePage;
pub use landing::LandingEnvelope;
pub use letter_overlay::LetterOverlay;
pub use question_card::{CardLayout, CardScene, QuestionCard};
pub use status_bar::StatusBar;

pub use crate::component_context::ComponentContext;

/// Something drawn on the card. Hit-testing stays with the owner of each
/// component, which asks it for its last layout.
pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);
}

/// Horizontal jitter for shake-style animations: a few quick swings that
/// settle back to zero by the end of `duration`.
pub fn jitter(elapsed: std::time::Duration, duration: std::time::Duration) -> i32 {
    if elapsed >= duration || duration.is_zero() {
        return 0;
    }
    const SWINGS: [i32; 6] = [-1, 1, -1, 1, -1, 0];
    let progress = elapsed.as_secs_f64() / duration.as_secs_f64();
    let index = ((progress * SWINGS.len() as f64) as usize).min(SWINGS.len() - 1);
    SWINGS[index]
}
