// A whole plaid: background color (which sets the tempo) plus the two line sets.

use super::line_style::{LineStyle, Rgb};

pub const MIN_BPM: u32 = 80;
pub const BPM_SPAN: u32 = 100; // 80..=180
pub const MIN_LINE_TYPES: usize = 2;
pub const MAX_LINE_TYPES: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    pub background: Rgb,
    pub bpm: u32,
    pub horizontal: Vec<LineStyle>,
    pub vertical: Vec<LineStyle>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Pattern {
    pub fn lines(&self, orientation: Orientation) -> &[LineStyle] {
        match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        }
    }

    // horizontal lines first, then vertical, each in stored order
    pub fn all_lines(&self) -> impl Iterator<Item = &LineStyle> {
        self.horizontal.iter().chain(self.vertical.iter())
    }
}

// Tempo is a pure function of the background: the channel average scaled onto 80..=180.
pub fn tempo_for(background: Rgb) -> u32 {
    let avg = background.channel_sum() / 3;
    MIN_BPM + avg * BPM_SPAN / 255
}

pub fn generate(rng: &mut fastrand::Rng) -> Pattern {
    let background = Rgb::random(rng);
    let horizontal = generate_lines(rng);
    let vertical = generate_lines(rng);
    Pattern {
        background,
        bpm: tempo_for(background),
        horizontal,
        vertical,
    }
}

fn generate_lines(rng: &mut fastrand::Rng) -> Vec<LineStyle> {
    let count = rng.usize(MIN_LINE_TYPES..=MAX_LINE_TYPES);
    (0..count).map(|_| LineStyle::random(rng)).collect()
}
