//! Canonical RIFF/WAVE encoder
//!
//! Writes the plain 44-byte header (no extensible format chunk) followed by
//! interleaved little-endian samples, in 16-bit integer or 32-bit float.

use crate::error::{ExportError, Result};
use crate::options::BitDepth;
use rendition_core::SampleBuffer;
use std::io::Write;
use std::path::Path;

/// Size of the canonical header in bytes.
pub const HEADER_LEN: usize = 44;

/// Largest payload the 32-bit RIFF size field can describe.
pub const MAX_DATA_LEN: u64 = (u32::MAX - 36) as u64;

/// The fixed fields of a canonical WAV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// Total file size minus 8.
    pub riff_size: u32,
    /// 1 = integer PCM, 3 = IEEE float.
    pub format_code: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    /// Payload length in bytes.
    pub data_len: u32,
}

impl WavHeader {
    /// Header for `frames` frames of `channels` channels.
    ///
    /// Fails with [`ExportError::InvalidData`] if the sizes do not fit the
    /// 32-bit RIFF fields.
    pub fn new(
        channels: usize,
        sample_rate: u32,
        bit_depth: BitDepth,
        frames: usize,
    ) -> Result<Self> {
        let channels = u16::try_from(channels).map_err(|_| {
            ExportError::InvalidData(format!("{} channels exceed the WAV limit", channels))
        })?;
        let bytes_per_sample = bit_depth.bytes_per_sample();
        let block_align = channels.checked_mul(bytes_per_sample).ok_or_else(|| {
            ExportError::InvalidData(format!("block align overflows for {} channels", channels))
        })?;

        let data_len = (frames as u64) * block_align as u64;
        if data_len > MAX_DATA_LEN {
            return Err(ExportError::InvalidData(format!(
                "{} bytes of audio exceed the 4 GiB WAV limit",
                data_len
            )));
        }
        let byte_rate = sample_rate as u64 * block_align as u64;
        let byte_rate = u32::try_from(byte_rate).map_err(|_| {
            ExportError::InvalidData(format!("byte rate {} overflows", byte_rate))
        })?;

        Ok(Self {
            riff_size: 36 + data_len as u32,
            format_code: bit_depth.format_code(),
            channels,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample: bit_depth.bits(),
            data_len: data_len as u32,
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(b"RIFF");
        out[4..8].copy_from_slice(&self.riff_size.to_le_bytes());
        out[8..12].copy_from_slice(b"WAVE");
        out[12..16].copy_from_slice(b"fmt ");
        out[16..20].copy_from_slice(&16u32.to_le_bytes());
        out[20..22].copy_from_slice(&self.format_code.to_le_bytes());
        out[22..24].copy_from_slice(&self.channels.to_le_bytes());
        out[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        out[28..32].copy_from_slice(&self.byte_rate.to_le_bytes());
        out[32..34].copy_from_slice(&self.block_align.to_le_bytes());
        out[34..36].copy_from_slice(&self.bits_per_sample.to_le_bytes());
        out[36..40].copy_from_slice(b"data");
        out[40..44].copy_from_slice(&self.data_len.to_le_bytes());
        out
    }

    /// Read a canonical header back from the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(ExportError::InvalidData(format!(
                "header needs {} bytes, got {}",
                HEADER_LEN,
                bytes.len()
            )));
        }

        for (offset, tag) in [(0, b"RIFF"), (8, b"WAVE"), (12, b"fmt "), (36, b"data")] {
            if &bytes[offset..offset + 4] != tag {
                return Err(ExportError::InvalidData(format!(
                    "expected '{}' at offset {}",
                    String::from_utf8_lossy(tag),
                    offset
                )));
            }
        }

        let u16_at = |offset: usize| u16::from_le_bytes([bytes[offset], bytes[offset + 1]]);
        let u32_at = |offset: usize| {
            u32::from_le_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ])
        };

        if u32_at(16) != 16 {
            return Err(ExportError::InvalidData(format!(
                "fmt chunk size {} is not 16",
                u32_at(16)
            )));
        }

        Ok(Self {
            riff_size: u32_at(4),
            format_code: u16_at(20),
            channels: u16_at(22),
            sample_rate: u32_at(24),
            byte_rate: u32_at(28),
            block_align: u16_at(32),
            bits_per_sample: u16_at(34),
            data_len: u32_at(40),
        })
    }

    /// Bit depth described by the format code and sample width.
    pub fn bit_depth(&self) -> Option<BitDepth> {
        match (self.format_code, self.bits_per_sample) {
            (1, 16) => Some(BitDepth::Int16),
            (3, 32) => Some(BitDepth::Float32),
            _ => None,
        }
    }
}

/// WAV encoder configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct WavEncoder {
    bit_depth: BitDepth,
    allow_empty: bool,
}

impl WavEncoder {
    pub fn new(bit_depth: BitDepth) -> Self {
        Self {
            bit_depth,
            allow_empty: false,
        }
    }

    /// Accept zero-frame buffers, producing a header-only file.
    ///
    /// Off by default: encoding an empty buffer fails with
    /// [`ExportError::EmptyBuffer`].
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// Encode to an in-memory WAV file.
    pub fn encode(&self, buffer: &SampleBuffer) -> Result<Vec<u8>> {
        let samples = buffer.frames() * buffer.channel_count();
        let payload = samples * self.bit_depth.bytes_per_sample() as usize;
        let mut bytes = Vec::with_capacity(HEADER_LEN + payload);
        self.encode_to_writer(buffer, &mut bytes)?;
        Ok(bytes)
    }

    /// Stream the encoded file to `writer`.
    pub fn encode_to_writer<W: Write>(&self, buffer: &SampleBuffer, mut writer: W) -> Result<()> {
        if buffer.is_empty() && !self.allow_empty {
            return Err(ExportError::EmptyBuffer);
        }

        let header = WavHeader::new(
            buffer.channel_count(),
            buffer.sample_rate(),
            self.bit_depth,
            buffer.frames(),
        )?;
        writer.write_all(&header.to_bytes())?;

        let samples = buffer.interleaved();
        let mut payload = Vec::with_capacity(header.data_len as usize);
        match self.bit_depth {
            BitDepth::Int16 => {
                let mut clipped = 0usize;
                for &sample in &samples {
                    if sample.abs() > 1.0 {
                        clipped += 1;
                    }
                    payload.extend_from_slice(&float_to_i16(sample).to_le_bytes());
                }
                if clipped > 0 {
                    log::warn!("Clipped {} samples while converting to 16-bit", clipped);
                }
            }
            BitDepth::Float32 => {
                for &sample in &samples {
                    payload.extend_from_slice(&sample.to_le_bytes());
                }
            }
        }
        writer.write_all(&payload)?;

        log::debug!(
            "Encoded {} ch x {} frames @ {} Hz as {}-bit WAV ({} bytes)",
            header.channels,
            buffer.frames(),
            header.sample_rate,
            header.bits_per_sample,
            HEADER_LEN + payload.len()
        );

        Ok(())
    }
}

/// Encode `buffer` as a WAV file in memory, rejecting empty buffers.
pub fn encode_wav(buffer: &SampleBuffer, bit_depth: BitDepth) -> Result<Vec<u8>> {
    WavEncoder::new(bit_depth).encode(buffer)
}

/// Encode `buffer` and write it to `path`.
pub fn write_wav_file(
    path: impl AsRef<Path>,
    buffer: &SampleBuffer,
    encoder: &WavEncoder,
) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    let mut writer = std::io::BufWriter::new(file);
    encoder.encode_to_writer(buffer, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Convert float sample to 16-bit integer with clipping
///
/// Negative values scale by 32768 and non-negative by 32767, so both
/// full-scale values map onto the ends of the i16 range.
#[inline]
pub(crate) fn float_to_i16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped < 0.0 {
        (clamped * 32768.0) as i16
    } else {
        (clamped * 32767.0) as i16
    }
}
