//! Multi-channel sample storage shared by the loader and the tone bank.

use crate::{Error, Result};
use ndarray::{Array2, ArrayView1};

/// Audio samples of shape `(channels, frames)` paired with their sample rate.
///
/// The engine never mutates a `SampleBuffer`; it reads one channel,
/// chosen by an explicit channel selector, and ignores the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    data: Array2<f32>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Wrap channel-major sample data.
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` for a zero sample rate or a
    /// buffer with no channels.
    pub fn new(data: Array2<f32>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::invalid_parameter(
                "sample_rate",
                sample_rate,
                "must be > 0",
            ));
        }
        if data.nrows() == 0 {
            return Err(Error::invalid_parameter(
                "channels",
                0,
                "a buffer needs at least one channel",
            ));
        }
        Ok(Self { data, sample_rate })
    }

    /// Single-channel buffer.
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> Result<Self> {
        let frames = samples.len();
        let data = Array2::from_shape_vec((1, frames), samples)
            .map_err(|e| Error::invalid_parameter("samples", frames, e.to_string()))?;
        Self::new(data, sample_rate)
    }

    /// Deinterleave 16-bit PCM (`L R L R ...`) into a float buffer.
    ///
    /// Samples are scaled by `1 / 32768` into `[-1, 1)`. A trailing
    /// partial frame is dropped.
    ///
    /// # Example
    /// ```
    /// use keytone::SampleBuffer;
    ///
    /// let buf = SampleBuffer::from_interleaved_i16(&[0, 16384, 0, -16384], 2, 44100).unwrap();
    /// assert_eq!(buf.channels(), 2);
    /// assert_eq!(buf.frames(), 2);
    /// assert_eq!(buf.channel(1).unwrap().to_vec(), vec![0.5, -0.5]);
    /// ```
    pub fn from_interleaved_i16(pcm: &[i16], channels: usize, sample_rate: u32) -> Result<Self> {
        if channels == 0 {
            return Err(Error::invalid_parameter(
                "channels",
                0,
                "a buffer needs at least one channel",
            ));
        }
        let frames = pcm.len() / channels;
        let scale = 1.0 / 32768.0;
        let data = Array2::from_shape_fn((channels, frames), |(ch, frame)| {
            pcm[frame * channels + ch] as f32 * scale
        });
        Self::new(data, sample_rate)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.data.nrows()
    }

    pub fn frames(&self) -> usize {
        self.data.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    pub fn data(&self) -> &Array2<f32> {
        &self.data
    }

    /// Borrow one channel.
    ///
    /// # Errors
    /// Returns `Error::ChannelOutOfRange` if `channel >= self.channels()`.
    pub fn channel(&self, channel: usize) -> Result<ArrayView1<'_, f32>> {
        if channel >= self.channels() {
            return Err(Error::ChannelOutOfRange {
                channel,
                channels: self.channels(),
            });
        }
        Ok(self.data.row(channel))
    }

    /// Copy one channel into a contiguous vector.
    pub fn channel_samples(&self, channel: usize) -> Result<Vec<f32>> {
        Ok(self.channel(channel)?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_out_of_range_is_rejected() {
        let buf = SampleBuffer::from_mono(vec![0.0; 16], 8000).unwrap();
        assert!(matches!(
            buf.channel(1),
            Err(Error::ChannelOutOfRange {
                channel: 1,
                channels: 1
            })
        ));
    }

    #[test]
    fn interleaved_drops_partial_frame() {
        let buf = SampleBuffer::from_interleaved_i16(&[1, 2, 3, 4, 5], 2, 8000).unwrap();
        assert_eq!(buf.frames(), 2);
        assert_eq!(buf.channel_samples(0).unwrap(), vec![1.0 / 32768.0, 3.0 / 32768.0]);
    }

    #[test]
    fn zero_sample_rate_is_rejected() {
        assert!(SampleBuffer::from_mono(vec![0.0; 4], 0).is_err());
    }

    #[test]
    fn duration_in_seconds() {
        let buf = SampleBuffer::from_mono(vec![0.0; 22050], 44100).unwrap();
        assert!((buf.duration() - 0.5).abs() < 1e-12);
    }
}
