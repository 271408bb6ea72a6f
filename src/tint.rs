use ratatui::style::Color;

/// Countdown display tint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Red,
    Orange,
    Yellow,
    Blue,
    Green,
}

/// (threshold, tint) pairs, ordered; the first threshold above the remaining seconds wins
pub const TINT_MAP: [(u32, Tint); 5] = [
    (5, Tint::Red),
    (10, Tint::Orange),
    (15, Tint::Yellow),
    (30, Tint::Blue),
    (60, Tint::Green),
];

impl Tint {
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Tint::Red => (0xec, 0x3e, 0x40),
            Tint::Orange => (0xff, 0x9b, 0x2b),
            Tint::Yellow => (0xf5, 0xd8, 0x00),
            Tint::Blue => (0x37, 0x7f, 0xc7),
            Tint::Green => (0x01, 0xa4, 0x6d),
        }
    }

    pub fn color(&self) -> Color {
        let (r, g, b) = self.rgb();
        Color::Rgb(r, g, b)
    }
}

/// Tint for the countdown, or `None` when no threshold lies above `remaining_secs`
pub fn tint_for(remaining_secs: u32) -> Option<Tint> {
    TINT_MAP
        .iter()
        .find(|(limit, _)| remaining_secs < *limit)
        .map(|&(_, tint)| tint)
}
