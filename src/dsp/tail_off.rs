/*
Tail-off Release
================

When a key is released we don't cut the note dead (that clicks). Instead the
voice keeps running and its output is multiplied by a gain that shrinks by a
fixed ratio every sample:

    tail_off[n+1] = tail_off[n] * 0.99

That is an exponential decay of about -0.0436 dB per sample. Once the gain
drops to 0.005 (about -46 dB) the note is treated as silent and the voice is
freed.

  gain
   1.0 ┐╲
       │ ╲
       │  ╲_
       │    ╲__
       │       ╲___
 0.005 ┤           ╲______ ← silence threshold
   0.0 └────────────────────→ samples
       0                 528

Starting from 1.0, 0.99^n <= 0.005 first holds at n = 528, independent of
sample rate. At 48 kHz that is an 11 ms fade.

Encoding
--------

A single value carries the whole state:

  0.0          holding (key down), gain is 1.0
  (0.0, 1.0]   releasing, gain is the value itself

Calling `start()` while already releasing does nothing, so a repeated
note-off doesn't restart the fade from full level.
*/

/// Per-sample multiplier applied while releasing.
pub const TAIL_OFF_DECAY: f64 = 0.99;
/// Gain at or below which a releasing voice is considered silent.
pub const TAIL_OFF_SILENCE: f64 = 0.005;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TailOff {
    value: f64,
}

impl TailOff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin the release. No effect if a release is already running.
    pub fn start(&mut self) {
        if self.value == 0.0 {
            self.value = 1.0;
        }
    }

    /// Back to holding.
    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    #[inline]
    pub fn is_releasing(&self) -> bool {
        self.value > 0.0
    }

    /// Raw tail-off value (0.0 while holding).
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Multiplier to apply to the current sample.
    #[inline]
    pub fn gain(&self) -> f64 {
        if self.is_releasing() {
            self.value
        } else {
            1.0
        }
    }

    /// Decay one sample. Returns `true` once the release has become silent.
    #[inline]
    pub fn advance(&mut self) -> bool {
        self.value *= TAIL_OFF_DECAY;
        self.value <= TAIL_OFF_SILENCE
    }

    /// Number of samples a release from full level lasts.
    pub fn samples_to_silence() -> usize {
        let mut tail = TailOff::new();
        tail.start();
        let mut samples = 1;
        while !tail.advance() {
            samples += 1;
        }
        samples
    }
}
