//! Viewpoint navigation core
//!
//! Pose math and the camera transform facade shared by the gesture engine.
//!
//! # Module Structure
//!
//! ```text
//! vnav-core/
//! ├── pose.rs        # Pose value and pure pose transforms
//! ├── transform.rs   # Write-through facade over a host scene node
//! ├── ray.rs         # Rays and ray-plane intersection
//! ├── bounds.rs      # Axis-aligned bounding boxes
//! ├── fov.rs         # Field-of-view resolution
//! ├── host.rs        # Host scene contract
//! ├── picking.rs     # Hover-picking flag and scoped suppression
//! ├── config.rs      # Navigation options
//! └── error.rs       # Error types
//! ```

pub mod bounds;
pub mod config;
pub mod constants;
pub mod error;
pub mod fov;
pub mod host;
pub mod picking;
pub mod pose;
pub mod ray;
pub mod transform;

// Re-exports for convenience
pub use bounds::BoundingBox;
pub use config::{ConfigError, NavigationMode, NavigationOptions, PoleBand};
pub use error::{NavError, NavResult};
pub use fov::{FovMetadata, field_of_view};
pub use host::SceneHost;
pub use picking::{HoverPicking, PickingSuppression};
pub use pose::Pose;
pub use ray::Ray;
pub use transform::{SceneNode, Transform};
