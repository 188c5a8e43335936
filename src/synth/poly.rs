use std::sync::Arc;

use crate::{
    config::SynthConfig,
    dsp::wavetable::WaveTable,
    error::SynthError,
    io::AudioBuffer,
    synth::{
        message::{MessageReceiver, SynthMessage},
        voice::{Voice, VoiceState},
    },
};

/// Fixed pool of wavetable voices sharing one table.
///
/// Note events pick a voice; `render_block` sums every active voice into the
/// caller's buffer. Nothing here allocates or logs after construction;
/// dropped notes are reported through [`dropped_notes`](Self::dropped_notes).
pub struct WavetableSynth {
    voices: Vec<Voice>,
    table: Arc<WaveTable>,
    sample_rate: f32,
    note_counter: u64,
    dropped_notes: u64,
}

impl WavetableSynth {
    pub fn new(table: Arc<WaveTable>, config: &SynthConfig) -> Result<Self, SynthError> {
        config.validate()?;

        let voices = (0..config.max_voices)
            .map(|_| Voice::new(Arc::clone(&table), config.sample_rate))
            .collect();

        log::debug!(
            "wavetable synth: {} voices, table length {}, {} Hz",
            config.max_voices,
            table.len(),
            config.sample_rate
        );

        Ok(Self {
            voices,
            table,
            sample_rate: config.sample_rate,
            note_counter: 0,
            dropped_notes: 0,
        })
    }

    /// Load a table of `config.table_length` samples from `source` and build
    /// the synth around it.
    pub fn from_buffer(source: &AudioBuffer, config: &SynthConfig) -> Result<Self, SynthError> {
        let table = WaveTable::from_buffer(source, config.table_length)?;
        Self::new(Arc::new(table), config)
    }

    /// Set the output sample rate. Call before the first note-on; notes that
    /// are already sounding keep their old pitch increment.
    pub fn prepare(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        for voice in &mut self.voices {
            voice.set_sample_rate(sample_rate);
        }
    }

    /// Start `note` on the first idle voice and return its slot.
    ///
    /// Voices still sounding the same note are released first. If no voice is
    /// idle the note is dropped and counted.
    pub fn note_on(&mut self, note: u8, velocity: f32) -> Result<usize, SynthError> {
        for voice in &mut self.voices {
            if voice.note() == Some(note) {
                voice.stop_note(true);
            }
        }

        let Some(slot) = self.voices.iter().position(Voice::is_free) else {
            self.dropped_notes += 1;
            return Err(SynthError::VoiceExhausted { note });
        };

        self.note_counter = self.note_counter.wrapping_add(1);
        self.voices[slot].start_note(note, velocity, self.note_counter);
        Ok(slot)
    }

    /// Stop every voice bound to `note`, including ones already tailing off,
    /// so a hard note-off can cut a fading note. Unmatched note-offs are ignored.
    pub fn note_off(&mut self, note: u8, allow_tail_off: bool) {
        for voice in &mut self.voices {
            if voice.note() == Some(note) {
                voice.stop_note(allow_tail_off);
            }
        }
    }

    pub fn all_notes_off(&mut self, allow_tail_off: bool) {
        for voice in &mut self.voices {
            voice.stop_note(allow_tail_off);
        }
    }

    pub fn pitch_wheel(&mut self, value: i16) {
        for voice in &mut self.voices {
            voice.pitch_wheel_moved(value);
        }
    }

    pub fn controller(&mut self, controller: u8, value: u8) {
        for voice in &mut self.voices {
            voice.controller_moved(controller, value);
        }
    }

    /// Apply one control message. A dropped note is already counted and
    /// logged by `note_on`, so it is not reported again here.
    pub fn handle_message(&mut self, msg: SynthMessage) {
        match msg {
            SynthMessage::NoteOn { note, velocity } => {
                let _ = self.note_on(note, velocity);
            }
            SynthMessage::NoteOff {
                note,
                allow_tail_off,
            } => self.note_off(note, allow_tail_off),
            SynthMessage::PitchWheel { value } => self.pitch_wheel(value),
            SynthMessage::Controller { controller, value } => self.controller(controller, value),
            SynthMessage::AllNotesOff { allow_tail_off } => self.all_notes_off(allow_tail_off),
        }
    }

    /// Drain pending messages, then render the block.
    pub fn process_block<R: MessageReceiver>(
        &mut self,
        rx: &mut R,
        out: &mut AudioBuffer,
        start_sample: usize,
        num_samples: usize,
    ) {
        while let Some(msg) = rx.pop() {
            self.handle_message(msg);
        }
        self.render_block(out, start_sample, num_samples);
    }

    /// Add every voice into `out[start_sample..start_sample + num_samples]`.
    /// The region is not cleared first.
    pub fn render_block(&mut self, out: &mut AudioBuffer, start_sample: usize, num_samples: usize) {
        for voice in &mut self.voices {
            voice.render_next_block(out, start_sample, num_samples);
        }
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    /// Note-ons dropped because every voice was busy.
    pub fn dropped_notes(&self) -> u64 {
        self.dropped_notes
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn table(&self) -> &Arc<WaveTable> {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    fn synth(max_voices: usize) -> WavetableSynth {
        let table = WaveTable::from_samples(vec![0.0, 1.0, 0.0, -1.0]).unwrap();
        let config = SynthConfig::default()
            .with_sample_rate(1_760.0)
            .with_max_voices(max_voices)
            .with_table_length(4);
        WavetableSynth::new(Arc::new(table), &config).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let table = Arc::new(WaveTable::sine(16).unwrap());
        let config = SynthConfig::default().with_max_voices(0);
        assert!(WavetableSynth::new(table, &config).is_err());
    }

    #[test]
    fn from_buffer_uses_configured_table_length() {
        let source = AudioBuffer::from_channels(vec![vec![0.5; 100]]);
        let config = SynthConfig::default().with_table_length(32);
        let synth = WavetableSynth::from_buffer(&source, &config).unwrap();
        assert_eq!(synth.table().len(), 32);

        let empty = AudioBuffer::default();
        assert!(matches!(
            WavetableSynth::from_buffer(&empty, &config),
            Err(SynthError::InvalidWaveform(_))
        ));
    }

    #[test]
    fn allocates_lowest_idle_voice() {
        let mut synth = synth(4);
        assert_eq!(synth.note_on(60, 1.0), Ok(0));
        assert_eq!(synth.note_on(64, 1.0), Ok(1));
        assert_eq!(synth.note_on(67, 1.0), Ok(2));
        assert_eq!(synth.active_voices(), 3);
    }

    #[test]
    fn exhausted_pool_drops_and_counts() {
        let mut synth = synth(2);
        synth.note_on(60, 1.0).unwrap();
        synth.note_on(64, 1.0).unwrap();

        assert_eq!(
            synth.note_on(67, 1.0),
            Err(SynthError::VoiceExhausted { note: 67 })
        );
        assert_eq!(synth.dropped_notes(), 1);
        // Existing notes are untouched
        assert_eq!(synth.voices()[0].note(), Some(60));
        assert_eq!(synth.voices()[1].note(), Some(64));
    }

    #[test]
    fn releasing_voices_are_not_stolen() {
        let mut synth = synth(1);
        synth.note_on(60, 1.0).unwrap();
        synth.note_off(60, true);

        assert!(synth.note_on(64, 1.0).is_err());
        assert_eq!(synth.voices()[0].state(), VoiceState::Releasing);
        assert_eq!(synth.voices()[0].note(), Some(60));
    }

    #[test]
    fn note_off_routes_by_note_number() {
        let mut synth = synth(4);
        synth.note_on(60, 1.0).unwrap();
        synth.note_on(64, 1.0).unwrap();

        synth.note_off(64, true);
        assert_eq!(synth.voices()[0].state(), VoiceState::Sustaining);
        assert_eq!(synth.voices()[1].state(), VoiceState::Releasing);

        synth.note_off(60, false);
        assert_eq!(synth.voices()[0].state(), VoiceState::Idle);
    }

    #[test]
    fn unmatched_note_off_is_ignored() {
        let mut synth = synth(2);
        synth.note_on(60, 1.0).unwrap();
        synth.note_off(72, true);
        assert_eq!(synth.voices()[0].state(), VoiceState::Sustaining);
    }

    #[test]
    fn retrigger_releases_previous_voice() {
        let mut synth = synth(4);
        synth.note_on(60, 1.0).unwrap();
        assert_eq!(synth.note_on(60, 0.5), Ok(1));

        assert_eq!(synth.voices()[0].state(), VoiceState::Releasing);
        assert_eq!(synth.voices()[1].state(), VoiceState::Sustaining);

        // A soft note-off leaves the running fade where it is
        let fading = synth.voices()[0].tail_off();
        synth.note_off(60, true);
        assert_eq!(synth.voices()[0].tail_off(), fading);
        assert_eq!(synth.voices()[1].state(), VoiceState::Releasing);
    }

    #[test]
    fn hard_note_off_cuts_releasing_and_held_voices() {
        let mut synth = synth(4);
        synth.note_on(60, 1.0).unwrap();
        synth.note_on(60, 1.0).unwrap();
        assert_eq!(synth.voices()[0].state(), VoiceState::Releasing);
        assert_eq!(synth.voices()[1].state(), VoiceState::Sustaining);

        synth.note_off(60, false);
        for voice in &synth.voices()[..2] {
            assert_eq!(voice.state(), VoiceState::Idle);
            assert_eq!(voice.note(), None);
        }
    }

    #[test]
    fn hard_note_off_cuts_a_fading_note() {
        let mut synth = synth(1);
        synth.note_on(60, 1.0).unwrap();
        synth.note_off(60, true);

        let mut out = AudioBuffer::new(1, 8);
        synth.render_block(&mut out, 0, 8);
        assert_eq!(synth.voices()[0].state(), VoiceState::Releasing);

        synth.note_off(60, false);
        assert_eq!(synth.voices()[0].state(), VoiceState::Idle);
        assert_eq!(synth.active_voices(), 0);
    }

    #[test]
    fn render_accumulates_into_buffer() {
        let mut synth = synth(2);
        synth.note_on(69, 1.0).unwrap();

        let mut out = AudioBuffer::from_channels(vec![vec![1.0; 4]]);
        synth.render_block(&mut out, 0, 4);

        let expected = [1.0, 1.15, 1.0, 0.85];
        for (actual, expected) in out.channel(0).unwrap().iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn process_block_drains_queue_before_rendering() {
        let mut synth = synth(4);
        let mut queue = VecDeque::from([
            SynthMessage::NoteOn {
                note: 69,
                velocity: 1.0,
            },
            SynthMessage::PitchWheel { value: 1000 },
            SynthMessage::Controller {
                controller: 7,
                value: 64,
            },
        ]);

        let mut out = AudioBuffer::new(1, 4);
        synth.process_block(&mut queue, &mut out, 0, 4);

        assert!(queue.is_empty());
        assert!((out.channel(0).unwrap()[1] - 0.15).abs() < 1e-6);
    }

    #[test]
    fn all_notes_off_with_tail_off_eventually_silences() {
        let mut synth = synth(3);
        for note in [60, 64, 67] {
            synth.note_on(note, 1.0).unwrap();
        }
        synth.handle_message(SynthMessage::AllNotesOff {
            allow_tail_off: true,
        });
        assert_eq!(synth.active_voices(), 3);

        let mut out = AudioBuffer::new(2, 1024);
        synth.render_block(&mut out, 0, 1024);
        assert_eq!(synth.active_voices(), 0);
    }

    #[test]
    fn prepare_changes_pitch_of_new_notes() {
        let mut synth = synth(1);
        synth.prepare(3_520.0);
        synth.note_on(69, 1.0).unwrap();
        assert!((synth.voices()[0].increment() - 0.125).abs() < 1e-9);
    }
}
