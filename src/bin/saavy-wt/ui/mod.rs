//! TUI for saavy-wt
//!
//! Reads the computer keyboard, forwards notes to the audio thread, and shows
//! the voice pool and output waveform.

pub mod state;
mod status;
mod voices;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};
use saavy_wavetable::synth::{message::SynthMessage, voice::LEVEL_SCALE};
use std::time::Duration;

pub use state::{UiStateInit, UiStateUpdate};

use super::keyboard::Keyboard;
use status::{render_status, AudioStats};
use voices::render_voices;
use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;

/// UI application state
pub struct UiApp {
    /// Ring buffer receiver for audio samples
    audio_rx: Consumer<f32>,
    /// Ring buffer receiver for voice snapshots
    state_rx: Consumer<UiStateUpdate>,
    /// Ring buffer sender for note events
    note_tx: Producer<SynthMessage>,
    static_state: UiStateInit,
    /// Latest snapshot from the audio thread
    current_state: UiStateUpdate,
    audio_buffer: Vec<f32>,
    keyboard: Keyboard,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        audio_rx: Consumer<f32>,
        state_rx: Consumer<UiStateUpdate>,
        note_tx: Producer<SynthMessage>,
        static_state: UiStateInit,
    ) -> Self {
        Self {
            audio_rx,
            state_rx,
            note_tx,
            static_state,
            current_state: UiStateUpdate::new(),
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            keyboard: Keyboard::new(),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_state();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        // Don't leave notes hanging on the way out
        self.send(SynthMessage::AllNotesOff {
            allow_tail_off: false,
        });

        Ok(())
    }

    /// Poll for new audio samples, keeping the last VIS_BUFFER_SIZE
    fn poll_audio(&mut self) {
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
        }

        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    /// Keep only the latest snapshot
    fn poll_state(&mut self) {
        while let Ok(state) = self.state_rx.pop() {
            self.current_state = state;
        }
    }

    fn send(&mut self, msg: SynthMessage) {
        if self.note_tx.push(msg).is_err() {
            log::warn!("note queue full, dropping {msg:?}");
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                let msg = self.keyboard.release_all();
                self.send(msg);
            }
            KeyCode::Char('z') => self.keyboard.octave_down(),
            KeyCode::Char('x') => self.keyboard.octave_up(),
            KeyCode::Char(c) => {
                if let Some(msg) = self.keyboard.toggle(c) {
                    self.send(msg);
                }
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(6),    // Voice pool
                Constraint::Length(10), // Oscilloscope
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_status(
            frame,
            chunks[0],
            &self.static_state,
            &self.current_state,
            self.keyboard.octave(),
            &stats,
        );

        render_voices(frame, chunks[1], &self.current_state);

        // Scale the scope to the loudest the pool can get, capped at full scale
        let range = (self.static_state.max_voices as f64 * LEVEL_SCALE).clamp(LEVEL_SCALE, 1.0);
        render_waveform(frame, chunks[2], &self.audio_buffer, range);

        let held = self.keyboard.held_notes().count();
        let help = Paragraph::new(format!(
            " [A-K] Toggle note ({held} held)  [Z/X] Octave  [Space] Release all  [Q] Quit"
        ))
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
