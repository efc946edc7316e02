//! Warden Core - shared types for the module adapter
//!
//! This crate holds the value types that flow through the adapter pipeline and
//! the effect interfaces the pipeline depends on. It contains no conversion or
//! authorization logic.
//!
//! # Contents
//!
//! - `CallDescriptor` / `CallMode`: a requested call as supplied by a module
//! - `Action`: the mode-stripped call submitted to the avatar
//! - `UnwrapperBinding`: one registry entry, `target → unwrapper`
//! - `WardenError`: unified error type for every pipeline stage
//! - `Avatar`, `ModuleMembership`, `TransactionUnwrapper`, `EventSink`:
//!   effect interfaces implemented outside the converter
//! - `AdapterConfig`: TOML configuration with environment overrides

#![forbid(unsafe_code)]

/// Adapter configuration
pub mod config;

/// Effect interfaces (no implementations)
pub mod effects;

/// Unified error handling
pub mod errors;

/// Adapter notifications
pub mod events;

/// Call descriptors, actions and registry bindings
pub mod types;

pub use config::{AdapterConfig, UnwrapperConfig, UnwrapperKind, SENTINEL_MODULE};
pub use effects::{Avatar, EventSink, ModuleMembership, TransactionUnwrapper};
pub use errors::{AvatarError, Result as WardenResult, WardenError};
pub use events::AdapterEvent;
pub use types::{Action, CallDescriptor, CallMode, UnwrapperBinding, UnwrapperId};

// Re-export primitives so downstream crates agree on one version
pub use alloy_primitives::{Address, Bytes, U256};
