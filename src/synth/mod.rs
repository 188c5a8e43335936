// Purpose: Voice management, polyphony, note event handling
// This layer sits above the DSP primitives and manages multiple voices

pub mod message;
pub mod poly;
pub mod voice;
