use keytone::{Error, SampleBuffer, ToneBank, ToneBankConfig, VocoderConfig, io, spectrum};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SR: u32 = 22050;

fn fast_config(offsets: Vec<i32>) -> ToneBankConfig {
    ToneBankConfig {
        offsets,
        channel: 0,
        vocoder: VocoderConfig {
            window_size: 2048,
            hop_length: 512,
            ..Default::default()
        },
    }
}

fn to_f32(pcm: &[i16]) -> Vec<f32> {
    pcm.iter().map(|&v| v as f32 / 32768.0).collect()
}

#[test]
fn bank_keeps_offset_order() {
    let source = SampleBuffer::from_mono(io::tone(440.0, SR, 1.0), SR).unwrap();
    let offsets = vec![5, -3, 0, 12, -12];
    let bank = ToneBank::build(&source, &fast_config(offsets.clone())).unwrap();

    assert_eq!(bank.len(), offsets.len());
    assert_eq!(bank.offsets().collect::<Vec<_>>(), offsets);
    assert_eq!(bank.sample_rate(), SR);
    for tone in &bank {
        assert_eq!(bank.get(tone.offset()), Some(tone.samples()));
    }
}

#[test]
fn bank_tones_are_shifted() {
    let source = SampleBuffer::from_mono(io::tone(440.0, SR, 1.0), SR).unwrap();
    let bank = ToneBank::build(&source, &fast_config(vec![-12, 0, 12])).unwrap();

    for (offset, expected) in [(-12, 220.0), (0, 440.0), (12, 880.0)] {
        let tone = bank.get(offset).unwrap();
        let f = spectrum::dominant_frequency(&to_f32(tone), SR).unwrap();
        assert!(
            (f - expected).abs() < expected * 0.02,
            "offset {offset}: {f} Hz"
        );
    }
}

#[test]
fn bank_construction_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);
    let samples: Vec<f32> = (0..SR as usize).map(|_| rng.gen_range(-0.5..0.5)).collect();
    let source = SampleBuffer::from_mono(samples, SR).unwrap();
    let config = fast_config((-4..=4).collect());

    let first = ToneBank::build(&source, &config).unwrap();
    let second = ToneBank::build(&source, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn bank_reads_only_the_selected_channel() {
    let frames = SR as usize;
    let tone = io::tone(330.0, SR, 1.0);
    // channel 0 silent, channel 1 carries the tone
    let data = Array2::from_shape_fn((2, frames), |(ch, i)| if ch == 1 { tone[i] } else { 0.0 });
    let source = SampleBuffer::new(data, SR).unwrap();

    let mut config = fast_config(vec![0, 7]);
    let silent = ToneBank::build(&source, &config).unwrap();
    assert!(silent.iter().all(|t| t.samples().iter().all(|&v| v == 0)));

    config.channel = 1;
    let voiced = ToneBank::build(&source, &config).unwrap();
    assert!(voiced.iter().all(|t| t.samples().iter().any(|&v| v != 0)));

    config.channel = 2;
    assert!(matches!(
        ToneBank::build(&source, &config),
        Err(Error::ChannelOutOfRange { .. })
    ));
}

#[test]
fn bank_hands_over_ownership() {
    let source = SampleBuffer::from_mono(io::tone(440.0, SR, 0.5), SR).unwrap();
    let bank = ToneBank::build(&source, &fast_config(vec![1, 2])).unwrap();
    let tones = bank.into_tones();
    assert_eq!(tones.len(), 2);
    let pcm = tones.into_iter().next().unwrap().into_samples();
    assert!(!pcm.is_empty());
}

#[test]
fn bank_rejects_duplicate_offsets() {
    let source = SampleBuffer::from_mono(io::tone(440.0, SR, 0.5), SR).unwrap();
    assert!(matches!(
        ToneBank::build(&source, &fast_config(vec![3, 3])),
        Err(Error::InvalidParameter { .. })
    ));
}

#[test]
fn default_bank_renders_full_inventory() {
    let source = SampleBuffer::from_mono(io::tone(261.63, 44100, 1.0), 44100).unwrap();
    let bank = ToneBank::build(&source, &ToneBankConfig::default()).unwrap();
    assert_eq!(bank.len(), 23);
    assert_eq!(bank.offsets().next(), Some(4));
    for tone in bank.iter() {
        let diff = tone.samples().len().abs_diff(44100);
        assert!(diff < 8, "offset {}: {} samples", tone.offset(), tone.samples().len());
    }
}
