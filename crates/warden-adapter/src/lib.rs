#![deny(clippy::await_holding_lock)]
//! # Warden Adapter
//!
//! Authorization gate between enabled modules and a single avatar. A module
//! requests one transaction; the adapter checks the module is enabled, converts
//! the request into the avatar's atomic action batch (unwrapping delegated
//! calls to registered batching targets), and submits the batch.

pub mod codec;
pub mod converter;
pub mod events;
pub mod gate;
pub mod logging;
pub mod modules;
pub mod registry;
pub mod setup;
pub mod unwrapper;

pub use codec::PackedBatchCodec;
pub use converter::TransactionConverter;
pub use events::{NoopEventSink, TracingEventSink};
pub use gate::ModuleAdapter;
pub use logging::{init_tracing, parse_filter};
pub use modules::ModuleSet;
pub use registry::UnwrapperRegistry;
pub use setup::{setup_adapter, setup_traced_adapter, unwrapper_for, AdapterDeployment};
pub use unwrapper::{
    encode_multisend_call, multisend_selector, MultisendCallUnwrapper, PackedBatchUnwrapper,
};
