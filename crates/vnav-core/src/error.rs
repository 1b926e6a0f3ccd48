//! Navigation error types

use uuid::Uuid;

/// Errors reported by the navigation layer
#[derive(Debug, Clone, thiserror::Error)]
pub enum NavError {
    /// The host reported that its scene environment is not attached
    #[error("Host scene environment is not available")]
    HostUnavailable,

    /// The node to be controlled does not exist in the host scene
    #[error("Controlled node not found: {0}")]
    NodeNotFound(Uuid),

    /// A construction option failed validation
    #[error("Invalid option `{key}`: {reason}")]
    InvalidOption {
        /// Option key as it appears in configuration
        key: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The examine target cannot report a world bounding box
    #[error("Target has no world bounding box: {0}")]
    NotExaminable(Uuid),
}

impl NavError {
    /// Create an invalid option error
    pub fn invalid_option(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for navigation operations
pub type NavResult<T> = Result<T, NavError>;
