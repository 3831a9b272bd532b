//! Edge case tests for boundary conditions and invalid inputs.
//!
//! Tests cover:
//! - Silent input of any length
//! - Inputs at and just below the minimum analysis length
//! - Invalid factors and configurations
//! - Non-finite samples
//! - Factors whose output would not fit in memory

use keytone::{Error, io};
use keytone::effects::MAX_OUTPUT_LEN;
use keytone::effects::phase_vocoder::{VocoderConfig, phase_vocoder, time_stretch};
use keytone::effects::resample::speedx;
use keytone::effects::time_pitch::pitch_shift;

fn small() -> VocoderConfig {
    VocoderConfig {
        window_size: 256,
        hop_length: 64,
        ..Default::default()
    }
}

fn noise(len: usize) -> Vec<f32> {
    // Deterministic pseudo-noise, never all zero
    (0..len)
        .map(|i| ((i as f32 * 12.9898).sin() * 43758.547).fract())
        .collect()
}

// Silent Input Tests

#[test]
fn silent_input_of_any_length_stays_silent() {
    let cfg = VocoderConfig::default();
    for len in [0usize, 1, 100, 10_239, 10_240, 44_100] {
        let y = vec![0.0f32; len];
        let out = time_stretch(&y, 0.8, &cfg).unwrap();
        assert_eq!(out.len(), cfg.output_len(len, 0.8).unwrap());
        assert!(out.iter().all(|&v| v == 0), "len {len} produced non-zero output");
    }
}

#[test]
fn silent_input_pitch_shift_stays_silent() {
    let y = vec![0.0f32; 5000];
    let out = pitch_shift(&y, -5.0, &small()).unwrap();
    assert!(out.iter().all(|&v| v == 0));
}

// Boundary Length Tests

#[test]
fn exact_minimum_length_runs_one_frame() {
    let cfg = small();
    let y = noise(cfg.min_input_len());
    for rate in [0.5, 1.0, 2.0] {
        let out = phase_vocoder(&y, rate, &cfg).unwrap();
        assert_eq!(out.frames, 1, "rate {rate}");
    }
}

#[test]
fn exact_minimum_length_with_default_config() {
    let cfg = VocoderConfig::default();
    let y = noise(8192 + 2048);
    let out = phase_vocoder(&y, 1.0, &cfg).unwrap();
    assert_eq!(out.frames, 1);
    assert!(out.samples.iter().any(|&v| v != 0.0));
}

#[test]
fn one_sample_short_is_insufficient() {
    let cfg = small();
    let y = noise(cfg.min_input_len() - 1);
    assert!(matches!(
        time_stretch(&y, 1.0, &cfg),
        Err(Error::InsufficientInputLength {
            len: 319,
            required: 320
        })
    ));
}

#[test]
fn frame_count_follows_cursor_step() {
    let cfg = small();
    // cursor advances by h * rate = 32; last start must satisfy i + 320 <= 1000
    let y = noise(1000);
    let out = phase_vocoder(&y, 0.5, &cfg).unwrap();
    assert_eq!(out.frames, (1000 - 320) / 32 + 1);
}

// Invalid Parameter Tests

#[test]
fn invalid_rates_are_rejected() {
    let y = noise(1000);
    for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            time_stretch(&y, rate, &small()),
            Err(Error::InvalidFactor { name: "rate", .. })
        ));
    }
}

#[test]
fn invalid_speedx_factor_is_rejected() {
    let y = vec![1i16, 2, 3];
    assert!(matches!(speedx(&y, 0.0), Err(Error::InvalidFactor { .. })));
    assert!(matches!(speedx(&y, -0.5), Err(Error::InvalidFactor { .. })));
}

#[test]
fn vanishing_rate_is_rejected_before_allocating() {
    let cfg = VocoderConfig::default();
    assert!(matches!(
        time_stretch(&[0.0; 100], 1e-20, &cfg),
        Err(Error::OutputTooLong {
            limit: MAX_OUTPUT_LEN,
            ..
        })
    ));
    assert!(matches!(
        phase_vocoder(&noise(1000), 1e-300, &small()),
        Err(Error::OutputTooLong { .. })
    ));
}

#[test]
fn extreme_semitone_counts_fail_cleanly() {
    let y = io::tone(440.0, 8000, 2.0);
    assert!(matches!(
        pitch_shift(&y, 1000.0, &small()),
        Err(Error::OutputTooLong { .. })
    ));
    // a huge rate leaves one frame and nothing after the warm-up window
    let down = pitch_shift(&y, -1000.0, &small()).unwrap();
    assert!(down.is_empty());
}

#[test]
fn vanishing_speedx_factor_is_rejected() {
    assert!(matches!(
        speedx(&[7i16], 1e-300),
        Err(Error::OutputTooLong { .. })
    ));
    let empty: [i16; 0] = [];
    assert!(speedx(&empty, 1e-300).unwrap().is_empty());
}

#[test]
fn non_overlapping_frames_are_rejected() {
    let cfg = VocoderConfig {
        window_size: 256,
        hop_length: 300,
        ..Default::default()
    };
    assert!(matches!(
        time_stretch(&noise(2000), 1.0, &cfg),
        Err(Error::InvalidParameter {
            name: "hop_length",
            ..
        })
    ));
}

#[test]
fn non_finite_samples_are_rejected() {
    let mut y = noise(1000);
    y[10] = f32::NAN;
    assert!(matches!(
        time_stretch(&y, 1.0, &small()),
        Err(Error::NonFiniteAudio)
    ));
    y[10] = f32::INFINITY;
    assert!(matches!(
        pitch_shift(&y, 3.0, &small()),
        Err(Error::NonFiniteAudio)
    ));
}

#[test]
fn output_never_contains_garbage() {
    // A signal that is zero except for a click inside the first frame
    let mut y = vec![0.0f32; 2000];
    y[5] = 1.0;
    let out = phase_vocoder(&y, 0.75, &small()).unwrap();
    assert!(out.samples.iter().all(|v| v.is_finite()));
}
