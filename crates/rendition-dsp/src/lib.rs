//! Offline filter building blocks: RBJ biquads and cascaded filter stages.
//!
//! A [`FilterStage`] owns the delay lines for one channel. Stages are cheap to
//! build, so a render creates a fresh one per channel instead of sharing.

mod error;
pub use error::{Error, Result};

mod biquad;
pub use biquad::{Biquad, BiquadCoefs};

mod kind;
pub use kind::{FilterKind, Rolloff};

mod stage;
pub use stage::FilterStage;
