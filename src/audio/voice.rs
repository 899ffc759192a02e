use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;

// Lowest and highest playback rates a pitch hint of 0 and 1 map onto.
pub const MIN_RATE: f32 = 0.75;
pub const RATE_SPAN: f32 = 0.5;

pub fn db_to_gain(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}

// Dark lines play a little slower and lower, bright ones a little faster.
pub fn pitch_hint_to_rate(hint: f32) -> f32 {
    MIN_RATE + hint.clamp(0.0, 1.0) * RATE_SPAN
}

// One playing sample. Each registry slot owns at most one of these, so a
// retrigger replaces it and the old hit is cut off.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Voice {
    pub pos: f32,  // fractional frame index into the slot's buffer
    pub rate: f32, // frames advanced per output frame
    pub gain: f32,
}

impl Voice {
    pub fn new(volume_db: f32, pitch_hint: f32) -> Self {
        Self {
            pos: 0.0,
            rate: pitch_hint_to_rate(pitch_hint),
            gain: db_to_gain(volume_db),
        }
    }

    // Mix the next frame into `out`. Returns false once the sample has run out.
    pub fn render_into(&mut self, buffer: &SampleBuffer, out: &mut StereoFrame) -> bool {
        if self.pos >= buffer.len() as f32 {
            return false;
        }
        out.add_scaled(buffer.frame_at(self.pos), self.gain);
        self.pos += self.rate;
        true
    }
}
