use crate::effects::phase_vocoder::{VocoderConfig, time_stretch};
use crate::effects::resample::speedx;
use crate::{Error, Result};

/// Frequency ratio of `n_steps` equal-tempered semitones, `2^(n/12)`.
///
/// # Example
/// ```
/// use keytone::effects::time_pitch::semitone_ratio;
///
/// assert_eq!(semitone_ratio(12.0), 2.0);
/// assert_eq!(semitone_ratio(-12.0), 0.5);
/// ```
pub fn semitone_ratio(n_steps: f64) -> f64 {
    2.0f64.powf(n_steps / 12.0)
}

/// Shift the pitch of one channel by `n_steps` semitones, keeping its
/// duration close to the original.
///
/// The signal is first stretched by the pitch ratio with the phase
/// vocoder, the first `W` samples (frames with no overlap history) are
/// discarded, and the remainder is resampled by the same ratio. The two
/// steps cancel in duration and compound in pitch.
///
/// # Errors
/// * `Error::InvalidFactor` if `n_steps` is not finite
/// * any error of [`time_stretch`]
pub fn pitch_shift(y: &[f32], n_steps: f64, config: &VocoderConfig) -> Result<Vec<i16>> {
    if !n_steps.is_finite() {
        return Err(Error::InvalidFactor {
            name: "n_steps",
            value: n_steps,
        });
    }
    let factor = semitone_ratio(n_steps);
    let stretched = time_stretch(y, 1.0 / factor, config)?;
    let settled = stretched.get(config.window_size..).unwrap_or_default();
    speedx(settled, factor)
}
