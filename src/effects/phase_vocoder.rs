use crate::effects::MAX_OUTPUT_LEN;
use crate::fft::FftPlan;
use crate::spectrum::SpectralFrame;
use crate::window::AnalysisWindow;
use crate::{Error, Result};
use std::f32::consts::TAU;

/// Default peak amplitude of a normalized stretch: 7/8 of 16-bit full scale.
pub const DEFAULT_PEAK_LEVEL: i16 = 28_672;

/// Frame and normalization parameters shared by stretching and pitch shifting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VocoderConfig {
    /// Analysis/synthesis window length `W` in samples.
    pub window_size: usize,
    /// Offset `h` between the two frames compared at each step.
    pub hop_length: usize,
    /// Largest absolute sample value after normalization.
    pub peak_level: i16,
}

impl Default for VocoderConfig {
    fn default() -> Self {
        Self {
            window_size: 8192,
            hop_length: 2048,
            peak_level: DEFAULT_PEAK_LEVEL,
        }
    }
}

impl VocoderConfig {
    /// Check that the window and hop describe overlapping frames.
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` if either size is zero, if
    /// `hop_length >= window_size`, or if `peak_level` is not positive.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(Error::invalid_parameter(
                "window_size",
                self.window_size,
                "must be > 0",
            ));
        }
        if self.hop_length == 0 {
            return Err(Error::invalid_parameter(
                "hop_length",
                self.hop_length,
                "must be > 0",
            ));
        }
        if self.hop_length >= self.window_size {
            return Err(Error::invalid_parameter(
                "hop_length",
                self.hop_length,
                format!(
                    "must be smaller than window_size ({}) so that frames overlap",
                    self.window_size
                ),
            ));
        }
        if self.peak_level <= 0 {
            return Err(Error::invalid_parameter(
                "peak_level",
                self.peak_level,
                "must be > 0",
            ));
        }
        Ok(())
    }

    /// Shortest input that yields one analysis step (`W + h`).
    pub fn min_input_len(&self) -> usize {
        self.window_size + self.hop_length
    }

    /// Length of the stretched buffer for `len` input samples at `rate`.
    ///
    /// # Errors
    /// Returns `Error::OutputTooLong` if the buffer would exceed
    /// [`MAX_OUTPUT_LEN`] samples.
    pub fn output_len(&self, len: usize, rate: f64) -> Result<usize> {
        let requested = (len as f64 / rate + self.window_size as f64).floor();
        if requested > MAX_OUTPUT_LEN as f64 {
            return Err(Error::OutputTooLong {
                requested,
                limit: MAX_OUTPUT_LEN,
            });
        }
        Ok(requested as usize)
    }
}

/// Running per-bin phase of the resynthesized frames.
///
/// Starts at zero and is advanced once per hop by the phase difference
/// between two analysis frames `h` samples apart, wrapped into `[0, 2π)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseAccumulator {
    phases: Vec<f32>,
}

impl PhaseAccumulator {
    pub fn new(bins: usize) -> Self {
        Self {
            phases: vec![0.0; bins],
        }
    }

    /// Add `angle(next / prev)` to every bin and wrap modulo 2π.
    pub fn advance(&mut self, prev: &SpectralFrame, next: &SpectralFrame) {
        for (phase, delta) in self.phases.iter_mut().zip(prev.phase_advance(next)) {
            *phase = (*phase + delta).rem_euclid(TAU);
        }
    }

    pub fn phases(&self) -> &[f32] {
        &self.phases
    }
}

/// Unnormalized output of [`phase_vocoder`].
#[derive(Debug, Clone, PartialEq)]
pub struct VocoderOutput {
    /// Overlap-added samples, `floor(len / rate + W)` long.
    pub samples: Vec<f32>,
    /// Number of analysis steps that contributed to `samples`.
    pub frames: usize,
}

/// Stretch a signal in time by `1 / rate` with phase-coherent overlap-add.
///
/// At each analysis position `i` (advancing by `h * rate`), the frames
/// `y[i..i+W]` and `y[i+h..i+W+h]` are windowed and transformed. Their
/// per-bin phase difference is accumulated, and the second frame is
/// resynthesized with its own magnitudes and the accumulated phases, then
/// overlap-added at output position `i / rate`. Because every output frame
/// lands `h` samples after the previous one, the accumulated phase keeps
/// each partial continuous and the pitch is unchanged.
///
/// An all-zero input of any length, including empty, produces an all-zero
/// output with no analysis steps.
///
/// # Errors
/// * `Error::InvalidFactor` if `rate` is not finite or `<= 0`
/// * `Error::InvalidParameter` if `config` is invalid
/// * `Error::NonFiniteAudio` if `y` contains NaN or Inf
/// * `Error::OutputTooLong` if `len / rate + W` exceeds [`MAX_OUTPUT_LEN`]
/// * `Error::InsufficientInputLength` if a non-silent `y` is shorter than `W + h`
pub fn phase_vocoder(y: &[f32], rate: f64, config: &VocoderConfig) -> Result<VocoderOutput> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(Error::InvalidFactor {
            name: "rate",
            value: rate,
        });
    }
    config.validate()?;
    if !y.iter().all(|v| v.is_finite()) {
        return Err(Error::NonFiniteAudio);
    }

    let out_len = config.output_len(y.len(), rate)?;
    if y.iter().all(|&v| v == 0.0) {
        return Ok(VocoderOutput {
            samples: vec![0.0; out_len],
            frames: 0,
        });
    }
    if y.len() < config.min_input_len() {
        return Err(Error::InsufficientInputLength {
            len: y.len(),
            required: config.min_input_len(),
        });
    }

    let w = config.window_size;
    let h = config.hop_length;
    let plan = FftPlan::new(w);
    let window = AnalysisWindow::hann(w);
    let mut phase = PhaseAccumulator::new(w);
    let mut samples = vec![0.0f32; out_len];
    let step = h as f64 * rate;

    let mut frames = 0usize;
    loop {
        let i = (frames as f64 * step) as usize;
        if i.saturating_add(w + h) > y.len() {
            break;
        }

        let spec1 = SpectralFrame::analyze(&y[i..i + w], &window, &plan);
        let spec2 = SpectralFrame::analyze(&y[i + h..i + w + h], &window, &plan);
        phase.advance(&spec1, &spec2);
        let rephased = spec2.resynthesize(phase.phases(), &plan);

        let start = ((i as f64 / rate) as usize).min(out_len);
        let end = (start + w).min(out_len);
        window.overlap_add(&rephased, &mut samples[start..end]);
        frames += 1;
    }

    log::debug!(
        "phase vocoder: {} samples at rate {rate:.4} -> {out_len} samples ({frames} frames)",
        y.len()
    );
    Ok(VocoderOutput { samples, frames })
}

/// Scale `samples` so the largest magnitude equals `peak_level` and
/// truncate to 16-bit integers.
///
/// # Errors
/// Returns `Error::DegenerateSilence` if every sample is zero, and
/// `Error::NonFiniteAudio` if any sample is NaN or Inf.
///
/// # Example
/// ```
/// use keytone::effects::phase_vocoder::normalize;
///
/// assert_eq!(normalize(&[0.5, -1.0, 0.25], 1000).unwrap(), vec![500, -1000, 250]);
/// assert!(normalize(&[0.0, 0.0], 1000).is_err());
/// ```
pub fn normalize(samples: &[f32], peak_level: i16) -> Result<Vec<i16>> {
    if !samples.iter().all(|v| v.is_finite()) {
        return Err(Error::NonFiniteAudio);
    }
    let peak = samples.iter().fold(0.0f32, |acc, v| acc.max(v.abs()));
    if peak == 0.0 {
        return Err(Error::DegenerateSilence);
    }
    let scale = peak_level as f32 / peak;
    Ok(samples.iter().map(|&v| (v * scale) as i16).collect())
}

/// Time-stretch one channel and quantize the result to 16-bit PCM.
///
/// `rate > 1` shortens the signal, `rate < 1` lengthens it; the output
/// has `floor(len / rate + W)` samples and the same pitch as the input.
/// The output is peak-normalized to `config.peak_level` on every call, so
/// loudness is not comparable between calls. A stretch with no energy is
/// returned as silence instead of failing normalization.
///
/// # Errors
/// See [`phase_vocoder`].
pub fn time_stretch(y: &[f32], rate: f64, config: &VocoderConfig) -> Result<Vec<i16>> {
    let output = phase_vocoder(y, rate, config)?;
    match normalize(&output.samples, config.peak_level) {
        Ok(pcm) => Ok(pcm),
        Err(Error::DegenerateSilence) => {
            if output.frames > 0 {
                log::warn!("time stretch produced a silent buffer; skipping normalization");
            }
            Ok(vec![0; output.samples.len()])
        }
        Err(e) => Err(e),
    }
}
