//! Scene-wide hover-picking flag
//!
//! Camera gestures must not fight with pick-on-hover, so the engine disables
//! it for the duration of a gesture. [`PickingSuppression`] is the scoped form
//! of that: the saved value is restored when the guard is dropped, whether the
//! gesture ended normally, was cancelled, or the engine unwound mid-gesture.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared handle to the host's pick-on-hover flag
#[derive(Debug, Clone)]
pub struct HoverPicking(Arc<AtomicBool>);

impl Default for HoverPicking {
    fn default() -> Self {
        Self::new(true)
    }
}

impl HoverPicking {
    /// Create a new flag
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    /// Current value
    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Overwrite the value
    pub fn set_enabled(&self, enabled: bool) {
        self.0.store(enabled, Ordering::Release);
    }

    /// Save the current value and disable picking until the guard drops
    pub fn suppress(&self) -> PickingSuppression {
        let saved = self.0.swap(false, Ordering::AcqRel);
        tracing::trace!(saved, "hover picking suppressed");
        PickingSuppression {
            flag: self.clone(),
            saved,
        }
    }
}

/// Guard restoring the hover-picking flag on drop
#[derive(Debug)]
#[must_use = "picking is restored as soon as the guard is dropped"]
pub struct PickingSuppression {
    flag: HoverPicking,
    saved: bool,
}

impl PickingSuppression {
    /// Value that will be restored
    pub fn saved(&self) -> bool {
        self.saved
    }
}

impl Drop for PickingSuppression {
    fn drop(&mut self) {
        self.flag.set_enabled(self.saved);
        tracing::trace!(restored = self.saved, "hover picking restored");
    }
}
