pub use crate::audio::SampleBuffer;

// Index into the fixed sample registry (kick, snare, ride, cowbell).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleSlot(pub u8);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerParams {
    pub slot: SampleSlot,
    pub volume_db: f32,  // -20..=0
    pub pitch_hint: f32, // 0..=1, the engine decides what playback rate that means
}

#[derive(Clone, Debug)]
pub enum AudioCommand {
    // The engine can't load files from the audio thread, so samples are decoded
    // up front (see loader/registry.rs) and handed over once.
    RegisterSample { slot: SampleSlot, buffer: SampleBuffer },

    // Restart the slot's voice from the top; whatever it was playing is cut off.
    Trigger(TriggerParams),
}
