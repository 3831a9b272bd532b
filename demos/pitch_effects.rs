//! Time Stretching and Pitch Shifting Example
//!
//! Stretches and shifts a short melody with the phase vocoder and reports
//! the resulting lengths and dominant frequencies.

use keytone::effects::{pitch_shift, semitone_ratio, time_stretch};
use keytone::{VocoderConfig, io, spectrum};
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    info!("Time Stretching and Pitch Shifting");

    let sr = 44100;

    // Create a melodic phrase: C4 - E4 - G4 - C5
    let note_duration = 0.5;
    let notes = [261.63, 329.63, 392.00, 523.25];
    let note_names = ["C4", "E4", "G4", "C5"];

    let mut melody = Vec::new();
    for (freq, name) in notes.iter().zip(note_names.iter()) {
        melody.extend(io::tone(*freq, sr, note_duration));
        info!("Added {} ({:.2} Hz): {} samples", name, freq, melody.len());
    }

    let config = VocoderConfig::default();

    info!("Time Stretching");
    for rate in [0.5, 1.0, 1.5, 2.0] {
        let stretched = time_stretch(&melody, rate, &config)?;
        info!(
            "  Rate {:.1}x: {} samples ({:.2}s -> {:.2}s)",
            rate,
            stretched.len(),
            melody.len() as f32 / sr as f32,
            stretched.len() as f32 / sr as f32
        );
    }

    info!("Pitch Shifting (440 Hz tone)");
    let a4 = io::tone(440.0, sr, 1.0);
    for n_steps in [-12.0, -5.0, 0.0, 4.0, 7.0, 12.0] {
        let shifted = pitch_shift(&a4, n_steps, &config)?;
        let as_float: Vec<f32> = shifted.iter().map(|&v| v as f32 / 32768.0).collect();
        let measured = spectrum::dominant_frequency(&as_float, sr).unwrap_or(0.0);
        info!(
            "  {:+5.1} semitones: {} samples, expected {:7.2} Hz, measured {:7.2} Hz",
            n_steps,
            shifted.len(),
            440.0 * semitone_ratio(n_steps),
            measured
        );
    }

    Ok(())
}
