//! Unified error system for Warden
//!
//! Every stage of the adapter pipeline fails closed with one of these variants.
//! Nothing is retried or downgraded to a partial result; the variant names the
//! stage that rejected the request.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Failure reported by the avatar for a submitted batch
///
/// The avatar executes a batch atomically, so this always means that no action
/// of the batch took effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("Avatar execution failed: {reason}")]
pub struct AvatarError {
    /// Reason reported by the avatar
    pub reason: String,
    /// Index of the action that failed, when the avatar reports it
    pub failed_action: Option<usize>,
}

impl AvatarError {
    /// Create an avatar error without a failing action index
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            failed_action: None,
        }
    }

    /// Create an avatar error attributed to one action of the batch
    pub fn at_action(index: usize, reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            failed_action: Some(index),
        }
    }
}

/// Unified error type for all Warden operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum WardenError {
    /// Caller is not an enabled module, or not the owner for admin operations
    #[error("Not authorized: {identity}")]
    NotAuthorized {
        /// Identity that was rejected
        identity: Address,
    },

    /// Rebinding a target to the unwrapper it is already bound to
    #[error("Unwrapper {unwrapper} is already bound to {target}")]
    UnwrapperAlreadyBound {
        /// Call target of the binding
        target: Address,
        /// Unwrapper already bound to the target
        unwrapper: Address,
    },

    /// A delegated call reached single-call conversion
    #[error("Delegated call not permitted")]
    DelegatedCallNotPermitted,

    /// Delegated request against a target with no bound unwrapper
    #[error("No unwrapper authorized for target {target}")]
    UnwrapperNotAuthorized {
        /// Target of the delegated request
        target: Address,
    },

    /// An unwrapper received a request outside its accepted shape
    #[error("Unsupported request shape: {reason}")]
    UnsupportedRequestShape {
        /// Which part of the request was rejected
        reason: String,
    },

    /// Packed batch bytes do not match their own declared layout
    #[error("Malformed batch: {reason}")]
    MalformedBatch {
        /// Where decoding stopped and why
        reason: String,
    },

    /// The avatar rejected the submitted batch
    #[error(transparent)]
    Avatar(#[from] AvatarError),

    /// Zero address or sentinel used as a module, or unknown pagination start
    #[error("Invalid module: {module}")]
    InvalidModule {
        /// Offending module address
        module: Address,
    },

    /// Module is already enabled
    #[error("Module already enabled: {module}")]
    AlreadyEnabledModule {
        /// Module address
        module: Address,
    },

    /// Module is not enabled
    #[error("Module already disabled: {module}")]
    AlreadyDisabledModule {
        /// Module address
        module: Address,
    },

    /// Pagination requested with a zero page size
    #[error("Invalid page size")]
    InvalidPageSize,

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration problem
        message: String,
    },
}

impl WardenError {
    /// Create a not-authorized error for the given identity
    pub fn not_authorized(identity: Address) -> Self {
        Self::NotAuthorized { identity }
    }

    /// Create an unsupported-request-shape error
    pub fn unsupported_shape(reason: impl Into<String>) -> Self {
        Self::UnsupportedRequestShape {
            reason: reason.into(),
        }
    }

    /// Create a malformed-batch error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedBatch {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Standard Result type for Warden operations
pub type Result<T> = std::result::Result<T, WardenError>;

impl From<std::io::Error> for WardenError {
    fn from(err: std::io::Error) -> Self {
        Self::config(err.to_string())
    }
}

impl From<toml::de::Error> for WardenError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("Invalid TOML: {err}"))
    }
}
