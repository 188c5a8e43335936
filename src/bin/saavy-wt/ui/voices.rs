//! Voice pool widget - one row per voice with its state and gain

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use saavy_wavetable::synth::voice::{VoiceState, LEVEL_SCALE};

use super::UiStateUpdate;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

fn note_name(note: u8) -> String {
    let octave = note as i32 / 12 - 1;
    format!("{}{}", NOTE_NAMES[note as usize % 12], octave)
}

pub fn render_voices(frame: &mut Frame, area: Rect, state: &UiStateUpdate) {
    let block = Block::default()
        .title(" Voices ")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width < 24 {
        return;
    }

    // Meter width left after "NN  state      note  "
    let meter_width = inner.width.saturating_sub(24) as usize;

    let lines: Vec<Line> = state
        .visible_voices()
        .iter()
        .enumerate()
        .map(|(idx, voice)| {
            let (label, color) = match voice.state {
                VoiceState::Idle => ("idle", Color::DarkGray),
                VoiceState::Sustaining => ("sustain", Color::Green),
                VoiceState::Releasing => ("release", Color::Yellow),
            };

            let note = voice.note.map(note_name).unwrap_or_else(|| "--".into());

            // Full bar = one full-velocity voice
            let fill = ((voice.gain as f64 / LEVEL_SCALE) * meter_width as f64)
                .round()
                .clamp(0.0, meter_width as f64) as usize;

            Line::from(vec![
                Span::styled(format!("{:>2}  ", idx + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{:<9}", label), Style::default().fg(color)),
                Span::styled(format!("{:<6}", note), Style::default().fg(Color::White)),
                Span::styled("█".repeat(fill), Style::default().fg(color)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
