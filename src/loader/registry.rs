// The fixed set of drum samples, decoded once at startup. A slot that fails
// to load stays empty for the rest of the run and every line mapped to it
// is simply silent.

use std::path::{Path, PathBuf};

use crate::audio::SampleBuffer;
use crate::audio_api::{AudioCommand, SampleSlot};
use crate::shared::{NUM_SAMPLES, SAMPLE_NAMES};

#[derive(Clone, Debug, Default)]
pub struct SampleRegistry {
    slots: [Option<SampleBuffer>; NUM_SAMPLES],
}

// <sample_dir>/kick.wav and so on
pub fn sample_path(sample_dir: &Path, slot: usize) -> PathBuf {
    sample_dir.join(format!("{}.wav", SAMPLE_NAMES[slot]))
}

impl SampleRegistry {
    pub fn load(sample_dir: &Path, target_rate: u32) -> Self {
        let slots = std::array::from_fn(|slot| {
            let path = sample_path(sample_dir, slot);
            match SampleBuffer::load_wav(&path, target_rate) {
                Ok(buffer) => {
                    log::info!("loaded {} ({} frames)", path.display(), buffer.len());
                    Some(buffer)
                }
                Err(e) => {
                    log::warn!("sample {} unavailable, slot muted: {e:#}", SAMPLE_NAMES[slot]);
                    None
                }
            }
        });
        Self { slots }
    }

    pub fn is_loaded(&self, slot: usize) -> bool {
        matches!(self.slots.get(slot), Some(Some(_)))
    }

    pub fn loaded(&self) -> [bool; NUM_SAMPLES] {
        std::array::from_fn(|slot| self.is_loaded(slot))
    }

    // Hand every decoded buffer over to the audio engine.
    pub fn into_commands(self) -> Vec<AudioCommand> {
        self.slots
            .into_iter()
            .enumerate()
            .filter_map(|(slot, buffer)| {
                buffer.map(|buffer| AudioCommand::RegisterSample {
                    slot: SampleSlot(slot as u8),
                    buffer,
                })
            })
            .collect()
    }
}
