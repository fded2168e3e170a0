//! Non-blocking export handle with progress polling.

use crate::export_builder::ExportProgress;
use crate::ExportError;
use crossbeam_channel::Receiver;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Status of a background export operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportStatus {
    /// Export is in progress.
    Running(ExportProgress),
    /// Export completed successfully.
    Complete,
    /// Export failed with an error message.
    Failed(String),
    /// Export was abandoned through [`ExportHandle::cancel()`].
    Cancelled,
    /// No progress yet (just started).
    Pending,
}

/// Handle to a background export operation.
///
/// Created by [`Exporter::start()`](crate::Exporter::start). Poll with
/// [`progress()`](ExportHandle::progress).
///
/// # Example
/// ```no_run
/// use rendition_export::{ExportStatus, Exporter, SampleBuffer};
///
/// let source = SampleBuffer::mono(44100, vec![0.0; 44100])?;
/// let mut export = Exporter::new(source).start("processed.wav")?;
///
/// loop {
///     match export.progress() {
///         ExportStatus::Running(p) => println!("{:?} {:.0}%", p.phase, p.progress * 100.0),
///         ExportStatus::Complete => { println!("Done!"); break; }
///         ExportStatus::Failed(e) => { eprintln!("Error: {}", e); break; }
///         ExportStatus::Cancelled => break,
///         ExportStatus::Pending => {}
///     }
/// }
/// # Ok::<(), rendition_export::ExportError>(())
/// ```
pub struct ExportHandle {
    progress_rx: Receiver<ExportProgress>,
    thread: Option<JoinHandle<crate::Result<()>>>,
    cancel: Arc<AtomicBool>,
    last_progress: Option<ExportProgress>,
    outcome: Option<crate::Result<()>>,
}

impl ExportHandle {
    pub(crate) fn new(
        progress_rx: Receiver<ExportProgress>,
        thread: JoinHandle<crate::Result<()>>,
        cancel: Arc<AtomicBool>,
    ) -> Self {
        Self {
            progress_rx,
            thread: Some(thread),
            cancel,
            last_progress: None,
            outcome: None,
        }
    }

    /// Poll for the latest export progress (non-blocking).
    ///
    /// Drains all pending progress messages and returns the latest one.
    /// Once the export thread has finished, every call returns the same
    /// terminal status.
    pub fn progress(&mut self) -> ExportStatus {
        if let Some(outcome) = &self.outcome {
            return terminal_status(outcome);
        }

        // Drain all pending progress messages to get the latest
        while let Ok(p) = self.progress_rx.try_recv() {
            self.last_progress = Some(p);
        }

        if self.thread.as_ref().is_some_and(|t| t.is_finished()) {
            if let Some(thread) = self.thread.take() {
                let outcome = join(thread);
                let status = terminal_status(&outcome);
                self.outcome = Some(outcome);
                return status;
            }
        }

        // Still running - return latest progress
        match self.last_progress {
            Some(p) => ExportStatus::Running(p),
            None => ExportStatus::Pending,
        }
    }

    /// Ask the export to stop.
    ///
    /// Checked between phases; an export that already reached the final
    /// rename completes normally. Nothing is written for a cancelled export.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    /// Block until the export finishes and return the result.
    pub fn wait(mut self) -> crate::Result<()> {
        match (self.thread.take(), self.outcome.take()) {
            (Some(thread), _) => join(thread),
            (None, Some(outcome)) => outcome,
            (None, None) => Ok(()),
        }
    }

    /// Check if the export has finished (non-blocking).
    pub fn is_done(&self) -> bool {
        self.thread
            .as_ref()
            .map(|t| t.is_finished())
            .unwrap_or(true)
    }
}

fn join(thread: JoinHandle<crate::Result<()>>) -> crate::Result<()> {
    thread.join().unwrap_or(Err(ExportError::Panicked))
}

fn terminal_status(outcome: &crate::Result<()>) -> ExportStatus {
    match outcome {
        Ok(()) => ExportStatus::Complete,
        Err(ExportError::Cancelled) => ExportStatus::Cancelled,
        Err(e) => ExportStatus::Failed(e.to_string()),
    }
}
