//! Phase-vocoder pitch shifting and pre-rendered tone banks.
//!
//! Keytone turns one recorded sound into a bank of pitch-shifted copies,
//! one per semitone offset, ready to be handed to a playback engine. The
//! pipeline is an offline batch transform:
//!
//! ```text
//! SampleBuffer --time_stretch--> stretched PCM --speedx--> shifted PCM --> ToneBank
//! ```
//!
//! - [`effects::phase_vocoder::time_stretch`] changes duration by `1/rate`
//!   without changing pitch (STFT analysis, phase accumulation, overlap-add).
//! - [`effects::resample::speedx`] changes playback speed, and with it pitch,
//!   by nearest-index resampling.
//! - [`effects::time_pitch::pitch_shift`] composes the two so that pitch
//!   moves by `n` semitones and duration stays close to the input's.
//! - [`ToneBank`] renders a whole inventory of offsets, in parallel when the
//!   `parallel` feature is enabled.
//!
//! # Quick Start
//!
//! ```rust
//! use keytone::{SampleBuffer, ToneBank, ToneBankConfig, VocoderConfig, io};
//!
//! // Half a second of A4 at 8 kHz
//! let source = SampleBuffer::from_mono(io::tone(440.0, 8000, 0.5), 8000).unwrap();
//!
//! let config = ToneBankConfig {
//!     offsets: (0..4).collect(),
//!     vocoder: VocoderConfig { window_size: 1024, hop_length: 256, ..Default::default() },
//!     ..Default::default()
//! };
//! let bank = ToneBank::build(&source, &config).unwrap();
//! assert_eq!(bank.len(), 4);
//! assert_eq!(bank.sample_rate(), 8000);
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`buffer`] | [`SampleBuffer`]: channel-major samples plus sample rate |
//! | [`effects`] | Resampling, phase vocoder time stretch, pitch shift |
//! | [`tone_bank`] | [`ToneBank`] construction and lookup |
//! | [`spectrum`] | [`spectrum::SpectralFrame`], dominant-frequency estimate |
//! | [`fft`] | Cached FFT plans |
//! | [`window`] | Hann analysis window |
//! | [`io`] | WAV/multi-format loading, WAV writing, tone generator |
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`. Invalid factors, too-short inputs,
//! silent buffers and bad configuration are reported as distinct
//! [`Error`] variants instead of NaN or empty output.
//!
//! # Feature Flags
//!
//! | Flag | Description |
//! |------|-------------|
//! | `parallel` (default) | Render tone bank entries on the rayon thread pool |

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, Result};

pub mod buffer;
pub mod effects;
pub mod fft;
pub mod io;
pub mod spectrum;
pub mod tone_bank;
pub mod window;

pub use buffer::SampleBuffer;
pub use effects::VocoderConfig;
pub use tone_bank::{Tone, ToneBank, ToneBankConfig};
