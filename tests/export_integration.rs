//! Export integration tests (requires "export" feature)
//!
//! Tests offline rendering, WAV encoding, and file export end to end.
//!
//! Run with:
//! ```bash
//! cargo test -p rendition --test export_integration
//! ```

mod helpers;

use helpers::tolerances::{DSP_EPSILON, INT16_EPSILON, SILENCE_THRESHOLD};
use helpers::*;
use rendition::prelude::*;
use rendition::ExportError;

/// One second of mono sine at double speed halves the length.
#[test]
fn test_end_to_end_double_speed() {
    let source = sine_buffer(440.0);

    let rendered = RenderPipeline::new()
        .render(&source, &RenderParameters::default().speed(2.0))
        .unwrap();
    assert_eq!(rendered.frames(), 22050);
    assert_eq!(rendered.sample_rate(), 44100);

    let bytes = encode_wav(&rendered, BitDepth::Int16).unwrap();
    assert_eq!(bytes.len(), 44 + 22050 * 2);
}

/// Double speed doubles the tone frequency: every other source sample.
#[test]
fn test_double_speed_decimates() {
    let source = sine_buffer(440.0);
    let rendered = RenderPipeline::new()
        .render(&source, &RenderParameters::default().speed(2.0))
        .unwrap();

    let input = source.channel(0).unwrap();
    let output = rendered.channel(0).unwrap();
    for (i, &sample) in output.iter().enumerate().take(1000) {
        assert!((sample - input[i * 2]).abs() < DSP_EPSILON);
    }
}

/// Exported file header round-trips metadata.
#[test]
fn test_header_roundtrip_metadata() {
    let left = generate_noise(1000, 1);
    let right = generate_noise(1000, 2);
    let source = SampleBuffer::stereo(48000, left, right).unwrap();

    for bit_depth in [BitDepth::Int16, BitDepth::Float32] {
        let bytes = encode_wav(&source, bit_depth).unwrap();
        let header = WavHeader::parse(&bytes).unwrap();

        assert_eq!(header.sample_rate, 48000);
        assert_eq!(header.channels, 2);
        assert_eq!(header.bit_depth(), Some(bit_depth));
        assert_eq!(
            header.data_len as usize,
            1000 * 2 * bit_depth.bytes_per_sample() as usize
        );
        assert_eq!(header.riff_size as usize, bytes.len() - 8);
        assert_eq!(bytes.len(), 44 + header.data_len as usize);
    }
}

/// Full-scale values hit the ends of the 16-bit range.
#[test]
fn test_int16_full_scale() {
    let source = SampleBuffer::mono(44100, vec![1.0, -1.0, 1.5, -3.0, 0.0]).unwrap();
    let bytes = encode_wav(&source, BitDepth::Int16).unwrap();
    assert_eq!(
        decode_i16_payload(&bytes),
        vec![32767, -32768, 32767, -32768, 0]
    );
}

/// Encoding the same rendered buffer twice is byte-identical.
#[test]
fn test_encode_idempotent() {
    let source = sine_buffer(220.0);
    let params = RenderParameters::default()
        .speed(1.25)
        .filter(FilterKind::Lowpass, 2000.0);
    let rendered = RenderPipeline::new().render(&source, &params).unwrap();

    let first = encode_wav(&rendered, BitDepth::Int16).unwrap();
    let second = encode_wav(&rendered, BitDepth::Int16).unwrap();
    assert_eq!(first, second);
}

/// Lowpass render removes a tone far above cutoff.
#[test]
fn test_lowpass_render_removes_high_tone() {
    let source = sine_buffer(12000.0);
    let params = RenderParameters::default()
        .filter(FilterKind::Lowpass, 200.0)
        .rolloff(-24.0);
    let rendered = RenderPipeline::new().render(&source, &params).unwrap();

    let tail = &rendered.channel(0).unwrap()[22050..];
    assert!(rms(tail) < 0.001, "rms {}", rms(tail));
}

/// Highpass render keeps a tone far above cutoff.
#[test]
fn test_highpass_render_keeps_high_tone() {
    let source = sine_buffer(5000.0);
    let params = RenderParameters::default().filter(FilterKind::Highpass, 100.0);
    let rendered = RenderPipeline::new().render(&source, &params).unwrap();

    let input_rms = rms(source.channel(0).unwrap());
    let output_rms = rms(&rendered.channel(0).unwrap()[4410..]);
    assert!((input_rms - output_rms).abs() < 0.01);
}

/// Filters run per channel: a silent channel stays silent.
#[test]
fn test_channels_filtered_independently() {
    let tone = generate_sine(440.0, 44100, 4410);
    let source = SampleBuffer::stereo(44100, tone, vec![0.0; 4410]).unwrap();
    let params = RenderParameters::default()
        .speed(0.8)
        .filter(FilterKind::Bandpass, 440.0);
    let rendered = RenderPipeline::new().render(&source, &params).unwrap();

    assert_eq!(rendered.channel_count(), 2);
    assert!(rendered
        .channel(1)
        .unwrap()
        .iter()
        .all(|s| s.abs() < SILENCE_THRESHOLD));
    assert!(rms(rendered.channel(0).unwrap()) > 0.1);
}

/// Cutoff at or above Nyquist is rejected.
#[test]
fn test_cutoff_above_nyquist() {
    let source = sine_buffer(440.0);
    let params = RenderParameters::default().filter(FilterKind::Lowpass, 24000.0);
    let result = RenderPipeline::new().render(&source, &params);
    assert!(matches!(result, Err(ExportError::InvalidParameters(_))));

    let stage = FilterStage::new(FilterKind::Lowpass, 24000.0, Rolloff::Db12, 44100);
    assert!(matches!(stage, Err(rendition::dsp::Error::InvalidParameters(_))));
}

/// Errors convert into the umbrella error.
#[test]
fn test_umbrella_error_conversion() {
    fn export_empty() -> rendition::Result<Vec<u8>> {
        let empty = SampleBuffer::silence(44100, 1, 0)?;
        Ok(Exporter::new(empty).to_bytes()?)
    }

    assert!(matches!(
        export_empty(),
        Err(rendition::Error::Export(ExportError::EmptyBuffer))
    ));

    fn bad_shape() -> rendition::Result<SampleBuffer> {
        Ok(SampleBuffer::stereo(44100, vec![0.0; 2], vec![0.0; 3])?)
    }
    assert!(matches!(
        bad_shape(),
        Err(rendition::Error::Core(rendition::core::Error::InvalidShape(_)))
    ));

    fn bad_stage() -> rendition::Result<FilterStage> {
        Ok(FilterStage::new(FilterKind::Lowpass, 30000.0, Rolloff::Db12, 44100)?)
    }
    assert!(matches!(bad_stage(), Err(rendition::Error::Dsp(_))));
}

/// Unusual but valid rates render and export like any other.
#[test]
fn test_low_and_high_rates_export() {
    for rate in [4000, 768000] {
        let source = SampleBuffer::mono(rate, vec![0.1, 0.2, 0.3]).unwrap();
        let bytes = Exporter::new(source).to_bytes().unwrap();
        let header = WavHeader::parse(&bytes).unwrap();
        assert_eq!(header.sample_rate, rate);
        assert_eq!(bytes.len(), 44 + 3 * 2);
    }
}

/// A configured rate range is enforced only when the host asks for it.
#[test]
fn test_configured_rate_range() {
    let source = SampleBuffer::mono(4000, vec![0.1, 0.2, 0.3]).unwrap();
    let pipeline = RenderPipeline::with_config(RenderConfig::default()).unwrap();
    let result = Exporter::new(source).pipeline(pipeline).to_bytes();
    assert!(matches!(
        result,
        Err(ExportError::Buffer(rendition::core::Error::InvalidRate(4000)))
    ));
}

/// Exported 16-bit file opens in a standard WAV reader with matching samples.
#[test]
fn test_export_to_wav_readable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_FILE_NAME);

    let left = generate_sine(440.0, 44100, 2205);
    let right = generate_sine(660.0, 44100, 2205);
    let source = SampleBuffer::stereo(44100, left.clone(), right).unwrap();

    Exporter::new(source).to_file(&path).unwrap();

    let mut reader = hound::WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);

    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples.len(), 2205 * 2);
    for (i, &expected) in left.iter().enumerate().step_by(97) {
        let raw = samples[i * 2] as f32;
        let decoded = if raw < 0.0 { raw / 32768.0 } else { raw / 32767.0 };
        assert!((decoded - expected).abs() <= 2.0 * INT16_EPSILON);
    }
}

/// Exported float file opens in a standard WAV reader unclamped.
#[test]
fn test_export_float_wav_readable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("float.wav");
    let source = SampleBuffer::mono(22050, vec![0.5, -1.25, 0.0, 2.0]).unwrap();

    Exporter::new(source)
        .bit_depth(BitDepth::Float32)
        .to_file(&path)
        .unwrap();

    let mut reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().sample_format, hound::SampleFormat::Float);
    let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
    assert_eq!(samples, vec![0.5, -1.25, 0.0, 2.0]);
}

/// Host-facing filter names parse and print symmetrically.
#[test]
fn test_filter_kind_names() {
    for (name, kind) in [
        ("none", FilterKind::None),
        ("lowpass", FilterKind::Lowpass),
        ("highpass", FilterKind::Highpass),
        ("bandpass", FilterKind::Bandpass),
    ] {
        assert_eq!(name.parse::<FilterKind>().unwrap(), kind);
        assert_eq!(kind.to_string(), name);
    }
}
