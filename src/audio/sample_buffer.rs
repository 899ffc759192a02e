use std::path::Path;

use anyhow::Context;

use super::frame::StereoFrame;

#[derive(Clone, Debug)]
pub struct SampleBuffer {
    pub data: Vec<StereoFrame>, // decoded at the engine's rate, always stereo
}

impl SampleBuffer {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    // Decode a WAV from disk and bring it to `target_rate`.
    pub fn load_wav(path: &Path, target_rate: u32) -> anyhow::Result<Self> {
        let mut reader = hound::WavReader::open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        let spec = reader.spec();
        if spec.channels == 0 {
            anyhow::bail!("{} declares zero channels", path.display());
        }

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => { // scale ints into -1..1
                let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|x| x as f32 / max))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        let frames = to_stereo(&samples, spec.channels as usize);
        let data = resample_linear(&frames, spec.sample_rate, target_rate);
        Ok(Self { data })
    }

    // Interpolated read at a fractional frame position; past the end reads as silence.
    pub fn frame_at(&self, pos: f32) -> StereoFrame {
        if pos < 0.0 {
            return StereoFrame::zero();
        }
        let i = pos as usize;
        let Some(&a) = self.data.get(i) else {
            return StereoFrame::zero();
        };
        let b = self.data.get(i + 1).copied().unwrap_or(a);
        StereoFrame::lerp(a, b, pos - i as f32)
    }
}

// mono is duplicated, anything wider keeps its first two channels
fn to_stereo(samples: &[f32], channels: usize) -> Vec<StereoFrame> {
    if channels == 1 {
        return samples.iter().map(|&x| StereoFrame::mono(x)).collect();
    }
    samples
        .chunks_exact(channels)
        .map(|c| StereoFrame { left: c[0], right: c[1] })
        .collect()
}

fn resample_linear(frames: &[StereoFrame], source_rate: u32, target_rate: u32) -> Vec<StereoFrame> {
    if source_rate == target_rate || frames.is_empty() || source_rate == 0 {
        return frames.to_vec();
    }
    let ratio = target_rate as f64 / source_rate as f64;
    let out_len = (frames.len() as f64 * ratio).ceil() as usize;

    (0..out_len)
        .map(|i| {
            let src = i as f64 / ratio;
            let idx = src.floor() as usize;
            let frac = (src - idx as f64) as f32;
            match (frames.get(idx), frames.get(idx + 1)) {
                (Some(&a), Some(&b)) => StereoFrame::lerp(a, b, frac),
                _ => *frames.last().unwrap_or(&StereoFrame::zero()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_wav(name: &str, channels: u16, rate: u32, samples: &[i16]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("plaidbeat-{}-{name}.wav", std::process::id()));
        let spec = hound::WavSpec {
            channels,
            sample_rate: rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut w = hound::WavWriter::create(&path, spec).unwrap();
        for &s in samples {
            w.write_sample(s).unwrap();
        }
        w.finalize().unwrap();
        path
    }

    #[test]
    fn mono_wav_is_duplicated() {
        let path = write_wav("mono", 1, 44100, &[0, 16384, -16384]);
        let buf = SampleBuffer::load_wav(&path, 44100).unwrap();
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.data[1], StereoFrame::mono(0.5));
        assert_eq!(buf.data[2], StereoFrame::mono(-0.5));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn stereo_wav_keeps_channels() {
        let path = write_wav("stereo", 2, 22050, &[16384, -16384, 0, 0]);
        let buf = SampleBuffer::load_wav(&path, 22050).unwrap();
        assert_eq!(buf.data, vec![StereoFrame { left: 0.5, right: -0.5 }, StereoFrame::zero()]);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn upsampling_doubles_length() {
        let path = write_wav("rate", 1, 22050, &[0, 16384, 16384, 0]);
        let buf = SampleBuffer::load_wav(&path, 44100).unwrap();
        assert_eq!(buf.len(), 8);
        // halfway between frame 0 and 1
        assert_eq!(buf.data[1], StereoFrame::mono(0.25));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = SampleBuffer::load_wav(Path::new("/definitely/not/here.wav"), 44100).unwrap_err();
        assert!(format!("{err:#}").contains("opening"));
    }

    #[test]
    fn frame_at_interpolates_and_ends_silent() {
        let buf = SampleBuffer {
            data: vec![StereoFrame::mono(0.0), StereoFrame::mono(1.0)],
        };
        assert_eq!(buf.frame_at(0.5), StereoFrame::mono(0.5));
        assert_eq!(buf.frame_at(1.0), StereoFrame::mono(1.0));
        assert_eq!(buf.frame_at(2.0), StereoFrame::zero());
        assert_eq!(buf.frame_at(-1.0), StereoFrame::zero());
    }
}
