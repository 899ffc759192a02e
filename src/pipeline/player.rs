// Turns "beat N just happened" into one trigger per line that fires on N.

use crate::audio_api::{AudioCommand, SampleSlot, TriggerParams};
use crate::shared::NUM_SAMPLES;

use super::line_style::LineStyle;
use super::pattern::Pattern;

pub const VOLUME_FLOOR_DB: f32 = -20.0;

// Thicker lines pick heavier samples: 0-3px -> 0, 4-7px -> 1, ..., clamped to the last slot.
pub fn sample_index(thickness: u32, sample_count: usize) -> usize {
    (thickness as usize / 4).min(sample_count.saturating_sub(1))
}

// More transparent lines are quieter: (1 - transparency) * -20 dB.
pub fn volume_db(transparency: f32) -> f32 {
    (1.0 - transparency) * VOLUME_FLOOR_DB
}

pub fn trigger_for(line: &LineStyle, sample_count: usize) -> TriggerParams {
    TriggerParams {
        slot: SampleSlot(sample_index(line.thickness, sample_count) as u8),
        volume_db: volume_db(line.transparency),
        pitch_hint: line.brightness(),
    }
}

#[derive(Clone, Debug)]
pub struct AudioPlayer {
    loaded: [bool; NUM_SAMPLES], // which registry slots actually decoded
}

impl AudioPlayer {
    pub fn new(loaded: [bool; NUM_SAMPLES]) -> Self {
        Self { loaded }
    }

    // Every trigger for this beat, horizontal lines first, in stored order.
    // Lines mapped to a slot that failed to load are skipped.
    pub fn play_beat(&self, pattern: &Pattern, beat: u8) -> Vec<AudioCommand> {
        pattern
            .all_lines()
            .filter(|line| line.triggers_on(beat))
            .map(|line| trigger_for(line, NUM_SAMPLES))
            .filter(|t| self.loaded[t.slot.0 as usize])
            .map(AudioCommand::Trigger)
            .collect()
    }
}
