//! Render a tone bank from a recorded sound and write every tone to disk.
//!
//! Usage: `cargo run --example render_bank -- <input> [output_dir]`
//!
//! Set `RUST_LOG=debug` to see per-tone progress.

use keytone::{ToneBank, ToneBankConfig, io};
use log::info;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .ok_or("usage: render_bank <input> [output_dir]")?;
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "tones".to_string()));

    let source = io::load(&input)?;
    info!(
        "Loaded {input}: {} Hz, {} channel(s), {:.2}s",
        source.sample_rate(),
        source.channels(),
        source.duration()
    );

    info!("Transposing sound file...");
    let bank = ToneBank::build(&source, &ToneBankConfig::default())?;
    info!("Done: {} tones", bank.len());

    std::fs::create_dir_all(&out_dir)?;
    for tone in &bank {
        let path = out_dir.join(format!("tone_{:+03}.wav", tone.offset()));
        io::save_wav(&path, tone.samples(), bank.sample_rate())?;
        info!("  {}", path.display());
    }

    Ok(())
}
