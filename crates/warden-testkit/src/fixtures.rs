//! Adapter fixtures
//!
//! A ready-made adapter wired to a [`MockAvatar`] and a [`RecordingEventSink`],
//! with one enabled module and a multiSend contract bound to the multisend
//! unwrapper.

use crate::events::RecordingEventSink;
use crate::mock_avatar::MockAvatar;
use alloy_primitives::Address;
use std::sync::Arc;
use warden_adapter::{setup_adapter, AdapterDeployment, ModuleAdapter, ModuleSet, UnwrapperRegistry};
use warden_core::{AdapterConfig, UnwrapperConfig, UnwrapperKind};

/// Administrative identity of fixture adapters
pub const OWNER: Address = Address::repeat_byte(0x0a);
/// Module enabled by default
pub const MODULE: Address = Address::repeat_byte(0x0b);
/// Caller that is never enabled
pub const STRANGER: Address = Address::repeat_byte(0x0c);
/// Avatar identity
pub const AVATAR: Address = Address::repeat_byte(0xa0);
/// Batching contract receiving `multiSend(bytes)` calldata
pub const MULTISEND: Address = Address::repeat_byte(0x40);
/// Identity of the multisend unwrapper bound to [`MULTISEND`]
pub const MULTISEND_UNWRAPPER: Address = Address::repeat_byte(0x41);
/// Batching contract receiving a bare packed batch
pub const PACKED_BATCHER: Address = Address::repeat_byte(0x50);
/// Identity of the packed unwrapper bound to [`PACKED_BATCHER`]
pub const PACKED_UNWRAPPER: Address = Address::repeat_byte(0x51);

/// Configuration used by [`TestAdapter::new`]
pub fn test_config() -> AdapterConfig {
    AdapterConfig {
        owner: OWNER,
        modules: vec![MODULE],
        unwrappers: vec![
            UnwrapperConfig {
                target: MULTISEND,
                unwrapper: MULTISEND_UNWRAPPER,
                kind: UnwrapperKind::Multisend,
            },
            UnwrapperConfig {
                target: PACKED_BATCHER,
                unwrapper: PACKED_UNWRAPPER,
                kind: UnwrapperKind::Packed,
            },
        ],
        log_filter: "debug".to_string(),
    }
}

/// Adapter plus handles to its collaborators
#[derive(Debug)]
pub struct TestAdapter {
    /// Gate under test
    pub adapter: ModuleAdapter,
    /// Avatar the gate submits to
    pub avatar: Arc<MockAvatar>,
    /// Events emitted by gate, registry and module set
    pub events: Arc<RecordingEventSink>,
    /// Module set
    pub modules: Arc<ModuleSet>,
    /// Unwrapper registry
    pub registry: Arc<UnwrapperRegistry>,
}

impl TestAdapter {
    /// Adapter built from [`test_config`]; setup events are cleared
    pub fn new() -> Self {
        Self::with_config(&test_config())
    }

    /// Adapter built from `config`; setup events are cleared
    pub fn with_config(config: &AdapterConfig) -> Self {
        Self::with_avatar(config, Arc::new(MockAvatar::new(AVATAR)))
    }

    /// Adapter built from `config` over a caller-supplied avatar
    pub fn with_avatar(config: &AdapterConfig, avatar: Arc<MockAvatar>) -> Self {
        let events = Arc::new(RecordingEventSink::new());
        let AdapterDeployment {
            adapter,
            modules,
            registry,
        } = setup_adapter(config, avatar.clone(), events.clone())
            .expect("fixture configuration is valid");
        events.clear();

        Self {
            adapter,
            avatar,
            events,
            modules,
            registry,
        }
    }
}

impl Default for TestAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Install a test-writer tracing subscriber; repeated calls are no-ops
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("warden=debug"))
        .with_test_writer()
        .try_init();
}
