//! WavetableApp - audio device setup and the realtime render callback

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use rtrb::RingBuffer;
use std::sync::Arc;

use saavy_wavetable::{
    dsp::wavetable::{WaveTable, DEFAULT_TABLE_LENGTH},
    io::AudioBuffer,
    synth::{message::SynthMessage, poly::WavetableSynth},
    SynthConfig, MAX_BLOCK_SIZE,
};

use super::ui::{UiApp, UiStateInit, UiStateUpdate};

/// Capacity of the UI → audio note queue
const NOTE_QUEUE_SIZE: usize = 256;
/// Capacity of the audio → UI scope queue (samples)
const SCOPE_QUEUE_SIZE: usize = 8192;
/// Capacity of the audio → UI voice snapshot queue
const STATE_QUEUE_SIZE: usize = 16;

/// Built-in single-cycle shapes for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Saw,
    Square,
    Triangle,
}

impl Waveform {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sine" | "sin" => Some(Self::Sine),
            "saw" | "sawtooth" => Some(Self::Saw),
            "square" | "sq" => Some(Self::Square),
            "triangle" | "tri" => Some(Self::Triangle),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sine => "sine",
            Self::Saw => "saw",
            Self::Square => "square",
            Self::Triangle => "triangle",
        }
    }

    /// Render one cycle into a table. Shapes are naive (not band-limited).
    fn build_table(&self, length: usize) -> EyreResult<WaveTable> {
        let table = match self {
            Self::Sine => WaveTable::sine(length),
            Self::Saw => WaveTable::from_fn(length, |t| 2.0 * t - 1.0),
            Self::Square => WaveTable::from_fn(length, |t| if t < 0.5 { 1.0 } else { -1.0 }),
            Self::Triangle => WaveTable::from_fn(length, |t| 1.0 - 4.0 * (t - 0.5).abs()),
        };
        table.wrap_err("failed to build wavetable")
    }
}

/// Main application builder
pub struct WavetableApp {
    waveform: Waveform,
    voices: usize,
    table_length: usize,
}

impl WavetableApp {
    pub fn new() -> Self {
        Self {
            waveform: Waveform::Sine,
            voices: 8,
            table_length: DEFAULT_TABLE_LENGTH,
        }
    }

    pub fn waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    /// Size of the voice pool (polyphony)
    pub fn voices(mut self, voices: usize) -> Self {
        self.voices = voices;
        self
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        // Set up audio
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        let synth_config = SynthConfig::default()
            .with_sample_rate(sample_rate)
            .with_max_voices(self.voices)
            .with_table_length(self.table_length);
        let table = Arc::new(self.waveform.build_table(self.table_length)?);
        let mut synth =
            WavetableSynth::new(table, &synth_config).wrap_err("invalid synth configuration")?;
        synth.prepare(sample_rate);

        log::info!(
            "{} table, {} voices, {} Hz, {} channels",
            self.waveform.name(),
            self.voices,
            sample_rate,
            channels
        );

        // Queues between the UI thread and the audio callback
        let (note_tx, mut note_rx) = RingBuffer::<SynthMessage>::new(NOTE_QUEUE_SIZE);
        let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_QUEUE_SIZE);
        let (mut state_tx, state_rx) = RingBuffer::<UiStateUpdate>::new(STATE_QUEUE_SIZE);

        // Mono render buffer; copied to every device channel
        let mut render_buf = AudioBuffer::new(1, MAX_BLOCK_SIZE);

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);

                    render_buf.clear_region(0, frames_to_render);
                    synth.process_block(&mut note_rx, &mut render_buf, 0, frames_to_render);

                    let out_off = frames_written * channels;
                    let out_len = frames_to_render * channels;
                    render_buf.interleave_into(
                        &mut data[out_off..out_off + out_len],
                        channels,
                        frames_to_render,
                    );

                    // Scope is best-effort: drop samples when the UI falls behind
                    if let Some(block) = render_buf.channel(0) {
                        for &sample in &block[..frames_to_render] {
                            if scope_tx.push(sample).is_err() {
                                break;
                            }
                        }
                    }

                    frames_written += frames_to_render;
                }

                let _ = state_tx.push(UiStateUpdate::from_synth(&synth));
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )?;

        stream.play()?;

        let init = UiStateInit {
            sample_rate,
            channels,
            waveform: self.waveform.name(),
            table_length: self.table_length,
            max_voices: self.voices,
        };

        let mut ui = UiApp::new(scope_rx, state_rx, note_tx, init);
        let mut terminal = ratatui::init();
        let result = ui.run(&mut terminal);
        ratatui::restore();

        drop(stream);
        result
    }
}

impl Default for WavetableApp {
    fn default() -> Self {
        Self::new()
    }
}
