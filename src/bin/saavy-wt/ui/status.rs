//! Status bar widget - engine settings, octave, voice usage, and audio stats

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{UiStateInit, UiStateUpdate};

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    static_state: &UiStateInit,
    dynamic_state: &UiStateUpdate,
    octave: i8,
    audio_stats: &AudioStats,
) {
    let block = Block::default()
        .title(" saavy-wt ")
        .borders(Borders::ALL);

    let sample_rate_khz = static_state.sample_rate / 1000.0;
    let voices_full = dynamic_state.active_voices as usize >= static_state.max_voices;

    let line = Line::from(vec![
        Span::styled(
            format!(" {} [{}]  ", static_state.waveform, static_state.table_length),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Octave {}  ", octave),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(
                "Voices {}/{}  ",
                dynamic_state.active_voices, static_state.max_voices
            ),
            Style::default().fg(if voices_full { Color::Yellow } else { Color::Green }),
        ),
        Span::styled(
            format!("Dropped {}  ", dynamic_state.dropped_notes),
            Style::default().fg(if dynamic_state.dropped_notes > 0 {
                Color::Red
            } else {
                Color::DarkGray
            }),
        ),
        Span::styled(
            format!("{:.1}kHz {}ch  ", sample_rate_khz, static_state.channels),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
