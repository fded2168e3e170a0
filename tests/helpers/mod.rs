//! Test helpers and fixtures for Rendition integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact operations (passthrough, unity gain)
//! - `DSP_EPSILON` (1e-4): DSP processing (filters, interpolation)
//! - `SILENCE_THRESHOLD` (0.0001): Silence detection (-80dB)
//! - `INT16_EPSILON`: one 16-bit quantization step

#![allow(dead_code)]

pub mod tolerances;

use rendition::prelude::*;

/// Default test sample rate (matches common hardware)
pub const TEST_SAMPLE_RATE: u32 = 44100;

/// Generate a test signal: sine wave at given frequency for specified samples.
pub fn generate_sine(frequency: f64, sample_rate: u32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            (2.0 * std::f64::consts::PI * frequency * t).sin() as f32
        })
        .collect()
}

/// Generate white noise (random samples in -1..1).
pub fn generate_noise(num_samples: usize, seed: u64) -> Vec<f32> {
    // Simple LCG for reproducible "random" noise
    let mut rng = seed;
    (0..num_samples)
        .map(|_| {
            rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((rng >> 33) as f32 / (u32::MAX >> 1) as f32) * 2.0 - 1.0
        })
        .collect()
}

/// One second of a mono sine tone at [`TEST_SAMPLE_RATE`].
pub fn sine_buffer(frequency: f64) -> SampleBuffer {
    SampleBuffer::mono(
        TEST_SAMPLE_RATE,
        generate_sine(frequency, TEST_SAMPLE_RATE, TEST_SAMPLE_RATE as usize),
    )
    .expect("valid mono buffer")
}

/// Calculate RMS of a signal.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// Read 16-bit samples back out of an encoded payload.
pub fn decode_i16_payload(bytes: &[u8]) -> Vec<i16> {
    bytes[44..]
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect()
}
