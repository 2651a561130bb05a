//! Error types for window decorations.

use thiserror::Error;

use crate::platform::Platform;
use crate::property::ValueKind;

/// Errors that can occur while configuring or attaching custom title bars.
#[derive(Error, Debug)]
pub enum DecorationError {
    /// An argument was outside its valid range. The target keeps its previous state.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// The name of the rejected argument.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The property key is inside the reserved `controls.` namespace but is not
    /// part of the known vocabulary.
    #[error("unknown title bar property `{0}`")]
    UnknownProperty(String),

    /// The property value does not have the type the key requires.
    #[error("property `{key}` expects a {expected} value, got {got}")]
    PropertyTypeMismatch {
        /// The property key.
        key: String,
        /// The value kind the key requires.
        expected: ValueKind,
        /// The value kind that was provided.
        got: ValueKind,
    },

    /// Custom title bars are not available on this platform.
    #[error("custom title bars are not supported on {0}")]
    UnsupportedPlatform(Platform),

    /// The window handle is invalid or the window has been destroyed.
    #[error("invalid or destroyed window handle")]
    InvalidWindow,

    /// The title bar handle is invalid, or its decoration has been cleared.
    #[error("invalid or destroyed title bar handle")]
    InvalidTitleBar,

    /// Failed to parse a configuration document.
    #[error("failed to parse decoration config: {0}")]
    Config(#[from] toml::de::Error),

    /// Failed to serialize a configuration document.
    #[error("failed to serialize decoration config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// I/O error while reading or writing configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DecorationError {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type for decoration operations.
pub type DecorationResult<T> = Result<T, DecorationError>;
