//! Reference host and input replay for the navigation engine
//!
//! - [`ReplayScene`] - Ground plane, named boxes and a perspective camera
//! - [`Script`] - RON input script
//! - [`replay`] - Feed a script through a navigator and record poses

pub mod camera;
pub mod scene;
pub mod script;

// Re-exports for convenience
pub use camera::CameraState;
pub use scene::{CameraNode, ReplayScene, SceneBox};
pub use script::{BoxSpec, CameraSetup, Event, PoseRecord, ReplayError, Script, replay};
