//! Time-scale and pitch effects.
//!
//! | Module | Operation |
//! |--------|-----------|
//! | [`resample`] | Nearest-index speed change ([`resample::speedx`]) |
//! | [`phase_vocoder`] | Phase vocoder time stretch ([`phase_vocoder::time_stretch`]) |
//! | [`time_pitch`] | Semitone pitch shift ([`time_pitch::pitch_shift`]) |

/// Largest buffer, in samples, a stretch or speed change may produce.
pub const MAX_OUTPUT_LEN: usize = 1 << 31;

pub mod phase_vocoder;
pub mod resample;
pub mod time_pitch;

pub use phase_vocoder::{VocoderConfig, normalize, phase_vocoder, time_stretch};
pub use resample::speedx;
pub use time_pitch::{pitch_shift, semitone_ratio};
