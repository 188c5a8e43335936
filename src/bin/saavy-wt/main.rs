//! saavy-wt - play the wavetable engine from the computer keyboard
//!
//! Run with: cargo run --bin saavy-wt [sine|saw|square|triangle] [voices]
//!
//! Set RUST_LOG=debug and redirect stderr to a file to see engine logs.

mod app;
mod keyboard;
mod ui;

use app::{Waveform, WavetableApp};
use color_eyre::eyre::{eyre, WrapErr};
use log::LevelFilter;
use simple_logger::SimpleLogger;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // The terminal belongs to the TUI, so logging stays off unless asked for
    SimpleLogger::new()
        .with_level(LevelFilter::Off)
        .env()
        .init()
        .wrap_err("failed to install logger")?;

    let mut args = std::env::args().skip(1);

    let waveform = match args.next() {
        Some(name) => Waveform::from_name(&name)
            .ok_or_else(|| eyre!("unknown waveform '{name}' (sine, saw, square, triangle)"))?,
        None => Waveform::Sine,
    };

    let voices = match args.next() {
        Some(n) => n
            .parse::<usize>()
            .wrap_err_with(|| format!("voice count '{n}' is not a number"))?,
        None => 8,
    };

    WavetableApp::new()
        .waveform(waveform)
        .voices(voices)
        .run()
}
