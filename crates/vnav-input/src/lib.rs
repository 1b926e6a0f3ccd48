//! Gesture engine
//!
//! Classifies raw pointer, touch and keyboard events into camera actions and
//! applies them to a [`vnav_core::Transform`].
//!
//! - [`Navigator`] - Event entry points and gesture lifecycle
//! - [`ModeTable`] - Per-mode action tables
//! - [`ActionKind`] - Camera actions and their start/move/end handlers

pub mod actions;
pub mod gesture;
pub mod keys;
pub mod mode;
pub mod navigator;
pub mod pick;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for convenience
pub use actions::ActionKind;
pub use gesture::{GestureState, PivotState};
pub use keys::Key;
pub use mode::ModeTable;
pub use navigator::{MoveEvent, Navigator};
pub use pick::resolve_pick;
