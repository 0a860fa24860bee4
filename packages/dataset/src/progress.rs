//! Progress reporting trait for dataset loading.
//!
//! Defines a [`ProgressCallback`] trait that decouples progress reporting
//! from any specific rendering backend (e.g., `indicatif` progress bars or
//! silence). Implementations live in crates that choose a rendering
//! strategy.

/// Trait for reporting progress while records are read.
pub trait ProgressCallback: Send + Sync {
    /// Set the total expected number of records, once known.
    fn set_total(&self, total: u64);

    /// Advance progress by `delta` records.
    fn inc(&self, delta: u64);

    /// Mark loading as complete with a final message.
    fn finish(&self, msg: String);
}

/// A no-op [`ProgressCallback`] for tests and library callers that do not
/// render progress.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn finish(&self, _msg: String) {}
}
