use crate::audio_api::{AudioCommand, TriggerParams};
use crate::shared::NUM_SAMPLES;

use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;
use super::voice::Voice;

// Lives on the audio thread. Slots are filled once by RegisterSample and then
// only read; voices come and go with triggers.
pub struct Engine {
    buffers: [Option<SampleBuffer>; NUM_SAMPLES],
    voices: [Option<Voice>; NUM_SAMPLES], // one per slot, retrigger replaces
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            buffers: std::array::from_fn(|_| None),
            voices: [None; NUM_SAMPLES],
        }
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::RegisterSample { slot, buffer } => {
                if let Some(entry) = self.buffers.get_mut(slot.0 as usize) {
                    *entry = Some(buffer);
                }
            }
            AudioCommand::Trigger(t) => self.trigger(t),
        }
    }

    fn trigger(&mut self, t: TriggerParams) {
        let idx = t.slot.0 as usize;
        // nothing registered there: the slot is mute
        if !matches!(self.buffers.get(idx), Some(Some(_))) {
            return;
        }
        self.voices[idx] = Some(Voice::new(t.volume_db, t.pitch_hint));
    }

    #[cfg(test)]
    pub fn active_voices(&self) -> usize {
        self.voices.iter().flatten().count()
    }

    pub fn next_frame(&mut self) -> StereoFrame {
        let mut out = StereoFrame::zero();
        for (voice, buffer) in self.voices.iter_mut().zip(&self.buffers) {
            let (Some(v), Some(buf)) = (voice.as_mut(), buffer) else {
                continue;
            };
            if !v.render_into(buf, &mut out) {
                *voice = None;
            }
        }
        out
    }

    // Fill an interleaved output block. Mono gets the average, extra channels
    // alternate left/right.
    pub fn render_interleaved(&mut self, data: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        for chunk in data.chunks_mut(channels) {
            let f = self.next_frame();
            if channels == 1 {
                chunk[0] = (f.left + f.right) * 0.5;
                continue;
            }
            for (ch, sample) in chunk.iter_mut().enumerate() {
                *sample = if ch % 2 == 0 { f.left } else { f.right };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio_api::SampleSlot;

    fn click(len: usize) -> SampleBuffer {
        SampleBuffer {
            data: vec![StereoFrame::mono(1.0); len],
        }
    }

    fn trigger(slot: u8) -> AudioCommand {
        AudioCommand::Trigger(TriggerParams {
            slot: SampleSlot(slot),
            volume_db: 0.0,
            pitch_hint: 0.5, // rate 1.0
        })
    }

    #[test]
    fn unregistered_slot_is_silent() {
        let mut e = Engine::new();
        e.handle_cmd(trigger(2));
        assert_eq!(e.active_voices(), 0);
        assert_eq!(e.next_frame(), StereoFrame::zero());
    }

    #[test]
    fn out_of_range_slot_is_ignored() {
        let mut e = Engine::new();
        e.handle_cmd(AudioCommand::RegisterSample { slot: SampleSlot(9), buffer: click(4) });
        e.handle_cmd(trigger(9));
        assert_eq!(e.active_voices(), 0);
    }

    #[test]
    fn voice_ends_with_its_sample() {
        let mut e = Engine::new();
        e.handle_cmd(AudioCommand::RegisterSample { slot: SampleSlot(0), buffer: click(2) });
        e.handle_cmd(trigger(0));
        assert_eq!(e.next_frame(), StereoFrame::mono(1.0));
        assert_eq!(e.next_frame(), StereoFrame::mono(1.0));
        assert_eq!(e.next_frame(), StereoFrame::zero());
        assert_eq!(e.active_voices(), 0);
    }

    #[test]
    fn retrigger_restarts_instead_of_stacking() {
        let mut e = Engine::new();
        e.handle_cmd(AudioCommand::RegisterSample { slot: SampleSlot(1), buffer: click(4) });
        e.handle_cmd(trigger(1));
        e.next_frame();
        e.next_frame();
        e.handle_cmd(trigger(1));
        assert_eq!(e.active_voices(), 1);
        // a full four frames again from the top, at unit level
        for _ in 0..4 {
            assert_eq!(e.next_frame(), StereoFrame::mono(1.0));
        }
        assert_eq!(e.next_frame(), StereoFrame::zero());
    }

    #[test]
    fn different_slots_mix() {
        let mut e = Engine::new();
        e.handle_cmd(AudioCommand::RegisterSample { slot: SampleSlot(0), buffer: click(4) });
        e.handle_cmd(AudioCommand::RegisterSample { slot: SampleSlot(3), buffer: click(4) });
        e.handle_cmd(trigger(0));
        e.handle_cmd(trigger(3));
        assert_eq!(e.next_frame(), StereoFrame::mono(2.0));
    }

    #[test]
    fn interleaves_for_mono_and_stereo() {
        let mut e = Engine::new();
        e.handle_cmd(AudioCommand::RegisterSample {
            slot: SampleSlot(0),
            buffer: SampleBuffer {
                data: vec![StereoFrame { left: 1.0, right: 0.0 }; 8],
            },
        });
        e.handle_cmd(trigger(0));

        let mut stereo = [0.0f32; 4];
        e.render_interleaved(&mut stereo, 2);
        assert_eq!(stereo, [1.0, 0.0, 1.0, 0.0]);

        let mut mono = [0.0f32; 2];
        e.render_interleaved(&mut mono, 1);
        assert_eq!(mono, [0.5, 0.5]);
    }
}
