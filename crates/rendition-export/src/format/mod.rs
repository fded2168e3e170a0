//! Audio format encoders
//!
//! - `wav`: canonical 44-byte-header RIFF/WAVE, 16-bit PCM or 32-bit float

pub mod wav;
