/// Normalised oscillator phase in [0, 1) and its per-sample increment.
///
/// Double precision keeps long notes from drifting; the table lookup itself
/// takes the phase as `f32`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Phase {
    value: f64,
    increment: f64,
}

impl Phase {
    pub fn new() -> Self {
        Self::default()
    }

    /// `increment = frequency / sample_rate`.
    pub fn set_increment(&mut self, frequency: f64, sample_rate: f64) {
        self.increment = if sample_rate > 0.0 {
            frequency / sample_rate
        } else {
            0.0
        };
    }

    pub fn clear_increment(&mut self) {
        self.increment = 0.0;
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn increment(&self) -> f64 {
        self.increment
    }

    /// Step one sample. A single wrap is enough while `increment < 1.0`.
    #[inline]
    pub fn advance(&mut self) {
        self.value += self.increment;
        if self.value >= 1.0 {
            self.value -= 1.0;
        }
    }
}
