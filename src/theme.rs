use ratatui::style::Color;

// Centralized card colors. RGB values go through `rgb_to_color` so terminals
// without truecolor get the closest xterm-256 entry.

pub const HEART_PALETTE: [(u8, u8, u8); 4] = [
    (255, 107, 139),
    (255, 143, 171),
    (255, 77, 109),
    (255, 175, 204),
];

pub const ACCENT_RGB: (u8, u8, u8) = (255, 77, 109);
pub const ACCENT_SOFT_RGB: (u8, u8, u8) = (255, 175, 204);
pub const GLOW_RGB: (u8, u8, u8) = (255, 105, 135);

pub fn truecolor_supported() -> bool {
    std::env::var("COLORTERM")
        .map(|value| {
            let value = value.to_lowercase();
            value.contains("truecolor") || value.contains("24bit")
        })
        .unwrap_or(false)
}

pub fn rgb_to_color(rgb: (u8, u8, u8)) -> Color {
    if truecolor_supported() {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    } else {
        Color::Indexed(xterm_index(rgb))
    }
}

/// Nearest entry of the xterm 6x6x6 color cube.
fn xterm_index((r, g, b): (u8, u8, u8)) -> u8 {
    const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];
    let nearest = |v: u8| {
        LEVELS
            .iter()
            .enumerate()
            .min_by_key(|(_, level)| (i16::from(**level) - i16::from(v)).abs())
            .map(|(idx, _)| idx as u8)
            .unwrap_or(0)
    };
    16 + 36 * nearest(r) + 6 * nearest(g) + nearest(b)
}

pub fn accent() -> Color {
    rgb_to_color(ACCENT_RGB)
}

pub fn accent_soft() -> Color {
    rgb_to_color(ACCENT_SOFT_RGB)
}

pub fn glow() -> Color {
    rgb_to_color(GLOW_RGB)
}

// Card
pub fn card_border() -> Color {
    accent_soft()
}
pub fn card_fg() -> Color {
    Color::White
}

// Buttons
pub fn accept_bg() -> Color {
    accent()
}
pub fn accept_fg() -> Color {
    Color::White
}
pub fn decline_bg() -> Color {
    Color::DarkGray
}
pub fn decline_fg() -> Color {
    Color::White
}

// Letters
pub fn letter_bg() -> Color {
    Color::Black
}
pub fn letter_fg() -> Color {
    Color::White
}
pub fn letter_close() -> Color {
    accent()
}

// Status bar
pub fn status_fg() -> Color {
    Color::DarkGray
}
