// One family of parallel plaid lines and the drum hit it stands for.

use crate::shared::GRID_SIZE;

pub const MIN_THICKNESS: u32 = 1;
pub const MAX_THICKNESS: u32 = 20;
pub const MIN_TRANSPARENCY: f32 = 0.1;
pub const TRANSPARENCY_SPAN: f32 = 0.8; // draws land in [0.1, 0.9)
pub const MIN_TRIGGERS: usize = 2;
pub const MAX_TRIGGERS: usize = 6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self::new(rng.u8(..), rng.u8(..), rng.u8(..))
    }

    // sum of the three channels, 0..=765
    pub fn channel_sum(self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }

    pub fn inverted(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b)
    }

    // 0xRRGGBB, used for the hex readout
    pub fn packed(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineStyle {
    pub color: Rgb,
    pub thickness: u32,     // px, 1..=20
    pub transparency: f32,  // 0.1..0.9, doubles as the draw alpha
    pub trigger_beats: Vec<u8>, // 2..=6 grid positions, duplicates allowed
}

impl LineStyle {
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        let color = Rgb::random(rng);
        let thickness = rng.u32(MIN_THICKNESS..=MAX_THICKNESS);
        let transparency = MIN_TRANSPARENCY + rng.f32() * TRANSPARENCY_SPAN;

        let count = rng.usize(MIN_TRIGGERS..=MAX_TRIGGERS);
        let trigger_beats = (0..count)
            .map(|_| rng.u8(..GRID_SIZE as u8))
            .collect();

        Self {
            color,
            thickness,
            transparency,
            trigger_beats,
        }
    }

    // membership is all that matters, so a duplicated position still fires once
    pub fn triggers_on(&self, beat: u8) -> bool {
        self.trigger_beats.contains(&beat)
    }

    // normalized color brightness in [0, 1], forwarded to the audio side as a pitch hint
    pub fn brightness(&self) -> f32 {
        self.color.channel_sum() as f32 / (3.0 * 255.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_lines_stay_in_range() {
        for seed in 0..500 {
            let mut rng = fastrand::Rng::with_seed(seed);
            let line = LineStyle::random(&mut rng);
            assert!((MIN_THICKNESS..=MAX_THICKNESS).contains(&line.thickness));
            assert!(line.transparency >= 0.1 && line.transparency < 0.9);
            assert!((MIN_TRIGGERS..=MAX_TRIGGERS).contains(&line.trigger_beats.len()));
            assert!(line.trigger_beats.iter().all(|&b| (b as usize) < GRID_SIZE));
        }
    }

    #[test]
    fn triggers_only_on_listed_beats() {
        let line = LineStyle {
            color: Rgb::new(10, 20, 30),
            thickness: 3,
            transparency: 0.5,
            trigger_beats: vec![1, 4, 4],
        };
        let hits: Vec<u8> = (0..GRID_SIZE as u8).filter(|&b| line.triggers_on(b)).collect();
        assert_eq!(hits, vec![1, 4]);
    }

    #[test]
    fn brightness_spans_black_to_white() {
        let mut line = LineStyle {
            color: Rgb::new(0, 0, 0),
            thickness: 1,
            transparency: 0.5,
            trigger_beats: vec![0, 1],
        };
        assert_eq!(line.brightness(), 0.0);
        line.color = Rgb::new(255, 255, 255);
        assert_eq!(line.brightness(), 1.0);
    }

    #[test]
    fn color_helpers() {
        let c = Rgb::new(0x12, 0xab, 0xff);
        assert_eq!(c.packed(), 0x12abff);
        assert_eq!(c.inverted(), Rgb::new(0xed, 0x54, 0x00));
        assert_eq!(c.channel_sum(), 0x12 + 0xab + 0xff);
    }
}
