// Constants and types shared by the sequencer core, the audio side and the TUI.
//
// The flow, roughly:
//   - tui::input turns key presses into `InputEvent`s
//   - middle owns the current pattern and the beat scheduler, turns events and
//     scheduler ticks into `AudioCommand`s (see audio_api.rs)
//   - main sends those to the audio thread and repaints the canvas whenever
//     middle says a redraw is pending

// The beat grid is GRID_SIZE x GRID_SIZE; the beat indicator walks the diagonal.
pub const GRID_SIZE: usize = 8;

// Sample slots, lightest to heaviest. Thicker lines pick later slots.
pub const SAMPLE_NAMES: [&str; NUM_SAMPLES] = ["kick", "snare", "ride", "cowbell"];
pub const NUM_SAMPLES: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Generate, // g / enter / space
    Quit,     // esc / q
}

// What the view needs each frame, apart from the canvas pixels themselves.
#[derive(Clone, Debug, Default)]
pub struct DisplayState {
    pub info_text: String,
    pub bpm: u32,
    pub current_beat: u8,
    pub loaded_samples: [bool; NUM_SAMPLES],
}
