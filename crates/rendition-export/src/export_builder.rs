use crate::decode::AudioDecoder;
use crate::format::wav::WavEncoder;
use crate::handle::ExportHandle;
use crate::renderer::RenderPipeline;
use crate::{BitDepth, ExportError, RenderParameters, Result};
use rendition_core::SampleBuffer;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportProgress {
    pub phase: ExportPhase,
    /// Progress within current phase (0.0 to 1.0).
    pub progress: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Resampling,
    Filtering,
    Encoding,
    Writing,
}

/// Builder that renders a source buffer and encodes the result as WAV.
///
/// The source is shared, not consumed, so one decoded file can be exported
/// any number of times with different parameters.
///
/// # Example
/// ```no_run
/// use rendition_export::{BitDepth, Exporter, FilterKind, RenderParameters, SampleBuffer};
///
/// let source = SampleBuffer::mono(44100, vec![0.0; 44100])?;
/// Exporter::new(source)
///     .params(RenderParameters::default().speed(1.25).filter(FilterKind::Lowpass, 800.0))
///     .bit_depth(BitDepth::Int16)
///     .to_file("processed.wav")?;
/// # Ok::<(), rendition_export::ExportError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Exporter {
    source: Arc<SampleBuffer>,
    params: RenderParameters,
    pipeline: RenderPipeline,
    bit_depth: BitDepth,
    allow_empty: bool,
}

impl Exporter {
    pub fn new(source: impl Into<Arc<SampleBuffer>>) -> Self {
        Self {
            source: source.into(),
            params: RenderParameters::default(),
            pipeline: RenderPipeline::new(),
            bit_depth: BitDepth::default(),
            allow_empty: false,
        }
    }

    /// Decode `bytes` with the host's decoder and export the result.
    pub fn decode(decoder: &impl AudioDecoder, bytes: &[u8]) -> Result<Self> {
        Ok(Self::new(decoder.decode(bytes)?))
    }

    pub fn params(mut self, params: RenderParameters) -> Self {
        self.params = params;
        self
    }

    pub fn pipeline(mut self, pipeline: RenderPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn bit_depth(mut self, bit_depth: BitDepth) -> Self {
        self.bit_depth = bit_depth;
        self
    }

    /// Produce a header-only file instead of failing when the render is empty.
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    fn encoder(&self) -> WavEncoder {
        WavEncoder::new(self.bit_depth).allow_empty(self.allow_empty)
    }

    pub fn source(&self) -> &SampleBuffer {
        &self.source
    }

    /// Render only, without encoding.
    pub fn render(&self) -> Result<SampleBuffer> {
        self.pipeline.render(&self.source, &self.params)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_bytes_with_progress(|_| {})
    }

    pub fn to_bytes_with_progress(
        &self,
        on_progress: impl Fn(ExportProgress),
    ) -> Result<Vec<u8>> {
        self.encode_impl(&on_progress, &AtomicBool::new(false))
    }

    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_file_with_progress(path, |_| {})
    }

    pub fn to_file_with_progress(
        &self,
        path: impl AsRef<Path>,
        on_progress: impl Fn(ExportProgress),
    ) -> Result<()> {
        self.write_impl(path.as_ref(), &on_progress, &AtomicBool::new(false))
    }

    /// Start a non-blocking background export, returning a handle to poll progress.
    ///
    /// The export runs on a dedicated thread. Poll [`ExportHandle::progress()`]
    /// for status updates, call [`ExportHandle::wait()`] to block, or
    /// [`ExportHandle::cancel()`] to abandon it.
    pub fn start(self, path: impl AsRef<Path>) -> Result<ExportHandle> {
        let path = path.as_ref().to_path_buf();
        check_extension(&path)?;

        let (tx, rx) = crossbeam_channel::bounded(64);
        let cancel = Arc::new(AtomicBool::new(false));
        let worker_cancel = Arc::clone(&cancel);

        let thread = std::thread::Builder::new()
            .name("rendition-export".into())
            .spawn(move || {
                self.write_impl(
                    &path,
                    &|p: ExportProgress| {
                        let _ = tx.try_send(p); // drop if full, poller catches up
                    },
                    &worker_cancel,
                )
            })?;

        Ok(ExportHandle::new(rx, thread, cancel))
    }

    fn encode_impl(
        &self,
        on_progress: &impl Fn(ExportProgress),
        cancel: &AtomicBool,
    ) -> Result<Vec<u8>> {
        check_cancelled(cancel)?;
        let rendered = self
            .pipeline
            .render_with_progress(&self.source, &self.params, on_progress)?;

        check_cancelled(cancel)?;
        on_progress(ExportProgress {
            phase: ExportPhase::Encoding,
            progress: 0.0,
        });
        let bytes = self.encoder().encode(&rendered)?;
        on_progress(ExportProgress {
            phase: ExportPhase::Encoding,
            progress: 1.0,
        });

        Ok(bytes)
    }

    /// Encode fully, then write through a temporary sibling file so a
    /// failed or cancelled export never leaves a partial `.wav` behind.
    fn write_impl(
        &self,
        path: &Path,
        on_progress: &impl Fn(ExportProgress),
        cancel: &AtomicBool,
    ) -> Result<()> {
        check_extension(path)?;
        let bytes = self.encode_impl(on_progress, cancel)?;

        check_cancelled(cancel)?;
        on_progress(ExportProgress {
            phase: ExportPhase::Writing,
            progress: 0.0,
        });

        let partial = partial_path(path);
        if let Err(e) =
            std::fs::write(&partial, &bytes).and_then(|_| std::fs::rename(&partial, path))
        {
            let _ = std::fs::remove_file(&partial);
            return Err(e.into());
        }

        on_progress(ExportProgress {
            phase: ExportPhase::Writing,
            progress: 1.0,
        });
        log::debug!("Exported {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

fn check_cancelled(cancel: &AtomicBool) -> Result<()> {
    if cancel.load(Ordering::Acquire) {
        return Err(ExportError::Cancelled);
    }
    Ok(())
}

fn check_extension(path: &Path) -> Result<()> {
    let is_wav = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));
    if !is_wav {
        return Err(ExportError::UnsupportedFormat(format!(
            "Unknown or unsupported file extension: {}. Supported: .wav",
            path.display()
        )));
    }
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}
