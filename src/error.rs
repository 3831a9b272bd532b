/// Crate-level error type for the keytone pitch-shifting engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A resampling or stretch factor that is zero, negative or not finite.
    #[error("invalid factor `{name}`: got {value}, must be finite and > 0")]
    InvalidFactor { name: &'static str, value: f64 },

    /// Peak normalization was asked to scale an all-zero buffer.
    #[error("cannot normalize a silent buffer (peak amplitude is zero)")]
    DegenerateSilence,

    /// Input is too short to fit a single pair of analysis frames.
    #[error("input has {len} samples, at least {required} (window + hop) are required")]
    InsufficientInputLength { len: usize, required: usize },

    /// Invalid parameter value.
    #[error("invalid parameter `{name}`: got {value}, {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// A stretch or speed factor would produce more samples than can be allocated.
    #[error("output of {requested} samples exceeds the limit of {limit}")]
    OutputTooLong { requested: f64, limit: usize },

    /// Channel selector does not address an existing channel.
    #[error("channel {channel} out of range for a buffer with {channels} channel(s)")]
    ChannelOutOfRange { channel: usize, channels: usize },

    /// Audio data contains non-finite values (NaN or Inf).
    #[error("audio data contains non-finite values")]
    NonFiniteAudio,

    /// Audio I/O errors.
    #[error(transparent)]
    Audio(#[from] crate::io::AudioError),
}

impl Error {
    pub(crate) fn invalid_parameter(
        name: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience Result type for keytone operations.
pub type Result<T> = std::result::Result<T, Error>;
