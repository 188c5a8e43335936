// Purpose - external interfaces, format conversions

pub mod converter;
pub mod midi;

/// Multi-channel block of float samples, one `Vec` per channel.
///
/// Used both as the waveform source handed to
/// [`WaveTable::from_buffer`](crate::dsp::wavetable::WaveTable::from_buffer)
/// and as the render target. Rendering only ever adds into it; clearing is the
/// caller's job.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AudioBuffer {
    pub buffers: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Zeroed buffer with `num_channels` channels of `num_samples` each.
    pub fn new(num_channels: usize, num_samples: usize) -> Self {
        Self {
            buffers: vec![vec![0.0; num_samples]; num_channels],
        }
    }

    /// Wrap existing channel data. Channels shorter than the longest are
    /// zero-padded so every channel has the same length.
    pub fn from_channels(mut buffers: Vec<Vec<f32>>) -> Self {
        let len = buffers.iter().map(Vec::len).max().unwrap_or(0);
        for channel in &mut buffers {
            channel.resize(len, 0.0);
        }
        Self { buffers }
    }

    pub fn num_channels(&self) -> usize {
        self.buffers.len()
    }

    pub fn num_samples(&self) -> usize {
        self.buffers.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.num_channels() == 0 || self.num_samples() == 0
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.buffers.get(index).map(Vec::as_slice)
    }

    /// Add `value` to one sample. Out-of-range positions are ignored.
    #[inline]
    pub fn add_sample(&mut self, channel: usize, index: usize, value: f32) {
        if let Some(sample) = self
            .buffers
            .get_mut(channel)
            .and_then(|samples| samples.get_mut(index))
        {
            *sample += value;
        }
    }

    /// Add `value` to the same position on every channel.
    #[inline]
    pub fn add_to_all_channels(&mut self, index: usize, value: f32) {
        for samples in &mut self.buffers {
            if let Some(sample) = samples.get_mut(index) {
                *sample += value;
            }
        }
    }

    pub fn clear(&mut self) {
        for samples in &mut self.buffers {
            samples.fill(0.0);
        }
    }

    /// Zero `[start, start + len)` on every channel, clamped to the buffer.
    pub fn clear_region(&mut self, start: usize, len: usize) {
        for samples in &mut self.buffers {
            let end = start.saturating_add(len).min(samples.len());
            if start < end {
                samples[start..end].fill(0.0);
            }
        }
    }

    /// Copy the first `frames` frames into an interleaved device buffer with
    /// `out_channels` channels. Extra device channels repeat the last buffer
    /// channel, so a mono render feeds both sides of a stereo device.
    pub fn interleave_into(&self, out: &mut [f32], out_channels: usize, frames: usize) {
        if out_channels == 0 || self.buffers.is_empty() {
            out.fill(0.0);
            return;
        }

        let last = self.buffers.len() - 1;
        for (frame_idx, frame) in out.chunks_mut(out_channels).take(frames).enumerate() {
            for (ch, slot) in frame.iter_mut().enumerate() {
                let source = &self.buffers[ch.min(last)];
                *slot = source.get(frame_idx).copied().unwrap_or(0.0);
            }
        }
    }
}
