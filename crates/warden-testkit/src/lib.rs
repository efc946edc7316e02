//! Warden Testing Infrastructure
//!
//! Mock collaborators and fixtures for exercising the module adapter without a
//! real avatar.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! warden-testkit = { path = "../warden-testkit" }
//! ```
//!
//! ```rust
//! use warden_testkit::*;
//!
//! let fixture = TestAdapter::new();
//! assert_eq!(fixture.adapter.owner(), OWNER);
//! ```

pub mod events;
pub mod fixtures;
pub mod mock_avatar;
pub mod strategies;

pub use events::RecordingEventSink;
pub use fixtures::*;
pub use mock_avatar::MockAvatar;
