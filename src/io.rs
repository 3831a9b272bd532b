//! Loading source sounds and storing rendered tones.

use crate::buffer::SampleBuffer;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use ndarray::Array2;
use std::io::ErrorKind;
use std::path::Path;
use symphonia::core::audio::SampleBuffer as DecodeBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, Track};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("hound error: {0}")]
    Hound(#[from] hound::Error),
    #[error("symphonia error: {0}")]
    Symphonia(SymphoniaError),
    #[error("no audio track found")]
    NoAudioTrack,
    #[error("unsupported number of channels")]
    UnsupportedChannels,
}

impl From<SymphoniaError> for AudioError {
    fn from(err: SymphoniaError) -> Self {
        Self::Symphonia(err)
    }
}

/// Load a WAV file into a [`SampleBuffer`].
///
/// Integer PCM is scaled to `[-1, 1)`; 32-bit float is read as is.
///
/// # Errors
/// Returns `crate::Error::Audio` if the file cannot be read or is invalid.
pub fn load_wav<P: AsRef<Path>>(path: P) -> crate::Result<SampleBuffer> {
    let mut reader = WavReader::open(path).map_err(AudioError::Hound)?;
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(AudioError::UnsupportedChannels.into());
    }

    let mut samples: Vec<f32> = Vec::new();
    match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, _) => {
            for s in reader.samples::<f32>() {
                samples.push(s.map_err(AudioError::Hound)?);
            }
        }
        (SampleFormat::Int, bits) if bits <= 16 => {
            let scale = (1i32 << (bits - 1)) as f32;
            for s in reader.samples::<i16>() {
                samples.push(s.map_err(AudioError::Hound)? as f32 / scale);
            }
        }
        (SampleFormat::Int, bits) => {
            let scale = (1i64 << (bits - 1)) as f32;
            for s in reader.samples::<i32>() {
                samples.push(s.map_err(AudioError::Hound)? as f32 / scale);
            }
        }
    }

    log::debug!(
        "loaded WAV: {} Hz, {} channel(s), {} samples",
        spec.sample_rate,
        spec.channels,
        samples.len()
    );
    deinterleave(&samples, spec.channels as usize, spec.sample_rate)
}

/// Load any format symphonia can decode (WAV, FLAC, MP3, OGG, ...).
///
/// # Errors
/// Returns `crate::Error::Audio` if the file cannot be probed or decoded.
pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<SampleBuffer> {
    let path = path.as_ref();
    let (mut format, track) = open_track(path)?;
    let sample_rate = track.codec_params.sample_rate.unwrap_or(0);
    let channels = decode_channels(format.as_mut(), &track)?;

    let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
    log::debug!(
        "decoded {}: {sample_rate} Hz, {} channel(s), {frames} frames",
        path.display(),
        channels.len()
    );
    let data = Array2::from_shape_fn((channels.len(), frames), |(ch, i)| channels[ch][i]);
    SampleBuffer::new(data, sample_rate)
}

/// Probe `path` and pick the first track that carries a sample rate.
fn open_track(path: &Path) -> Result<(Box<dyn FormatReader>, Track), AudioError> {
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let file = std::fs::File::open(path).map_err(SymphoniaError::IoError)?;
    let stream = MediaSourceStream::new(Box::new(file), Default::default());
    let probed = symphonia::default::get_probe().format(
        &hint,
        stream,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;

    let track = probed
        .format
        .tracks()
        .iter()
        .find(|t| t.codec_params.sample_rate.is_some())
        .cloned()
        .ok_or(AudioError::NoAudioTrack)?;
    Ok((probed.format, track))
}

/// Decode every packet of `track` into one sample vector per channel.
fn decode_channels(
    format: &mut dyn FormatReader,
    track: &Track,
) -> Result<Vec<Vec<f32>>, AudioError> {
    let count = track.codec_params.channels.map_or(0, |c| c.count());
    if count == 0 {
        return Err(AudioError::UnsupportedChannels);
    }

    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;
    let mut channels = vec![Vec::new(); count];
    let mut planar: Option<DecodeBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) if packet.track_id() == track.id => packet,
            Ok(_) => continue,
            // end of stream
            Err(SymphoniaError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(e)) => {
                log::warn!("skipping undecodable packet: {e}");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if decoded.spec().channels.count() != count {
            return Err(AudioError::UnsupportedChannels);
        }

        // one planar buffer, regrown only when a packet outgrows it
        let needed = decoded.capacity() * count;
        if planar.as_ref().is_none_or(|buf| buf.capacity() < needed) {
            planar = Some(DecodeBuffer::new(decoded.capacity() as u64, *decoded.spec()));
        }
        let Some(buf) = planar.as_mut() else {
            continue;
        };
        buf.copy_planar_ref(decoded);

        let frames = buf.samples().len() / count;
        if frames == 0 {
            continue;
        }
        for (dst, src) in channels.iter_mut().zip(buf.samples().chunks_exact(frames)) {
            dst.extend_from_slice(src);
        }
    }

    Ok(channels)
}

fn deinterleave(samples: &[f32], channels: usize, sample_rate: u32) -> crate::Result<SampleBuffer> {
    let frames = samples.len() / channels.max(1);
    let data = Array2::from_shape_fn((channels, frames), |(ch, frame)| {
        samples[frame * channels + ch]
    });
    SampleBuffer::new(data, sample_rate)
}

/// Write 16-bit mono PCM, e.g. one tone of a bank, to a WAV file.
///
/// # Errors
/// Returns `crate::Error::Audio` if the file cannot be written.
pub fn save_wav<P: AsRef<Path>>(path: P, samples: &[i16], sample_rate: u32) -> crate::Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).map_err(AudioError::Hound)?;
    for &s in samples {
        writer.write_sample(s).map_err(AudioError::Hound)?;
    }
    writer.finalize().map_err(AudioError::Hound)?;
    Ok(())
}

/// Generate a pure tone.
pub fn tone(frequency: f32, sr: u32, duration: f32) -> Vec<f32> {
    let n_samples = (duration * sr as f32) as usize;
    let angular_freq = 2.0 * std::f64::consts::PI * frequency as f64 / sr as f64;
    (0..n_samples)
        .map(|i| (angular_freq * i as f64).sin() as f32)
        .collect()
}
