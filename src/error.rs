use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthError {
    /// The waveform source had no usable samples.
    #[error("invalid waveform: {0}")]
    InvalidWaveform(String),

    /// Every voice was busy when a note-on arrived; the note was dropped.
    #[error("no idle voice available for note {note}")]
    VoiceExhausted { note: u8 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SynthError>;
