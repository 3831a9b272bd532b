//! Pre-rendered pitch-shifted copies of one source sound.
//!
//! A [`ToneBank`] is built once, eagerly, from a [`SampleBuffer`] and a
//! list of semitone offsets. Every entry is rendered before the bank is
//! returned, so a playback layer can start any tone without further DSP.
//! With the `parallel` feature (on by default) the entries are rendered on
//! the rayon thread pool; the bank keeps the configured offset order
//! either way.

use crate::buffer::SampleBuffer;
use crate::effects::phase_vocoder::VocoderConfig;
use crate::effects::time_pitch::pitch_shift;
use crate::{Error, Result};
use std::collections::HashSet;
use std::time::Instant;

/// Which tones to render and how.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneBankConfig {
    /// Semitone offsets to render, in bank order.
    pub offsets: Vec<i32>,
    /// Source channel that drives the analysis; other channels are ignored.
    pub channel: usize,
    pub vocoder: VocoderConfig,
}

impl Default for ToneBankConfig {
    fn default() -> Self {
        Self {
            offsets: (4..27).collect(),
            channel: 0,
            vocoder: VocoderConfig::default(),
        }
    }
}

impl ToneBankConfig {
    /// Default configuration rendering `offsets` instead of the default range.
    pub fn with_offsets(offsets: impl IntoIterator<Item = i32>) -> Self {
        Self {
            offsets: offsets.into_iter().collect(),
            ..Default::default()
        }
    }

    /// # Errors
    /// Returns `Error::InvalidParameter` for an empty or repeated offset
    /// list, or an invalid vocoder configuration.
    pub fn validate(&self) -> Result<()> {
        if self.offsets.is_empty() {
            return Err(Error::invalid_parameter(
                "offsets",
                "[]",
                "at least one semitone offset is required",
            ));
        }
        let mut seen = HashSet::with_capacity(self.offsets.len());
        for &offset in &self.offsets {
            if !seen.insert(offset) {
                return Err(Error::invalid_parameter(
                    "offsets",
                    offset,
                    "each semitone offset may appear only once",
                ));
            }
        }
        self.vocoder.validate()
    }
}

/// One rendered entry of a [`ToneBank`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tone {
    offset: i32,
    samples: Vec<i16>,
}

impl Tone {
    /// Semitone offset relative to the source sound.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Mono 16-bit PCM at the bank's sample rate.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }
}

/// Immutable set of pitch-shifted renderings of one source sound.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneBank {
    tones: Vec<Tone>,
    sample_rate: u32,
}

impl ToneBank {
    /// Render every configured offset of `source`.
    ///
    /// All tones are rendered before this returns. If any tone fails, the
    /// error of the earliest failing offset (in configuration order) is
    /// returned and no bank is produced.
    ///
    /// # Errors
    /// * `Error::InvalidParameter` if `config` is invalid
    /// * `Error::ChannelOutOfRange` if `config.channel` does not exist
    /// * any error of [`pitch_shift`], e.g. `Error::InsufficientInputLength`
    ///
    /// # Example
    /// ```
    /// use keytone::{SampleBuffer, ToneBank, ToneBankConfig, VocoderConfig, io};
    ///
    /// let source = SampleBuffer::from_mono(io::tone(440.0, 8000, 0.5), 8000).unwrap();
    /// let config = ToneBankConfig {
    ///     offsets: vec![-2, 0, 3],
    ///     vocoder: VocoderConfig { window_size: 512, hop_length: 128, ..Default::default() },
    ///     ..Default::default()
    /// };
    /// let bank = ToneBank::build(&source, &config).unwrap();
    /// assert_eq!(bank.offsets().collect::<Vec<_>>(), vec![-2, 0, 3]);
    /// assert!(bank.get(3).is_some());
    /// assert!(bank.get(1).is_none());
    /// ```
    pub fn build(source: &SampleBuffer, config: &ToneBankConfig) -> Result<Self> {
        config.validate()?;
        let samples = source.channel_samples(config.channel)?;

        log::info!(
            "rendering {} tones from {} samples at {} Hz (channel {})",
            config.offsets.len(),
            samples.len(),
            source.sample_rate(),
            config.channel
        );
        let started = Instant::now();

        let rendered = render_all(&samples, &config.offsets, &config.vocoder);
        let tones = rendered.into_iter().collect::<Result<Vec<_>>>()?;

        log::info!(
            "rendered {} tones in {:.2?}",
            tones.len(),
            started.elapsed()
        );
        Ok(Self {
            tones,
            sample_rate: source.sample_rate(),
        })
    }

    /// Samples of the tone at `offset` semitones.
    pub fn get(&self, offset: i32) -> Option<&[i16]> {
        self.tones
            .iter()
            .find(|t| t.offset == offset)
            .map(Tone::samples)
    }

    /// Tones in configuration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tone> {
        self.tones.iter()
    }

    pub fn offsets(&self) -> impl Iterator<Item = i32> + '_ {
        self.tones.iter().map(Tone::offset)
    }

    pub fn len(&self) -> usize {
        self.tones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Hand the rendered tones over to the playback layer.
    pub fn into_tones(self) -> Vec<Tone> {
        self.tones
    }
}

impl<'a> IntoIterator for &'a ToneBank {
    type Item = &'a Tone;
    type IntoIter = std::slice::Iter<'a, Tone>;

    fn into_iter(self) -> Self::IntoIter {
        self.tones.iter()
    }
}

fn render_tone(samples: &[f32], offset: i32, vocoder: &VocoderConfig) -> Result<Tone> {
    let pcm = pitch_shift(samples, offset as f64, vocoder)?;
    log::debug!("tone {offset:+}: {} samples", pcm.len());
    Ok(Tone {
        offset,
        samples: pcm,
    })
}

fn render_all(samples: &[f32], offsets: &[i32], vocoder: &VocoderConfig) -> Vec<Result<Tone>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        offsets
            .par_iter()
            .map(|&offset| render_tone(samples, offset, vocoder))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        offsets
            .iter()
            .map(|&offset| render_tone(samples, offset, vocoder))
            .collect()
    }
}
