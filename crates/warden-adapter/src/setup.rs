//! Adapter construction from configuration

use crate::events::TracingEventSink;
use crate::gate::ModuleAdapter;
use crate::logging::parse_filter;
use crate::modules::ModuleSet;
use crate::registry::UnwrapperRegistry;
use crate::unwrapper::{MultisendCallUnwrapper, PackedBatchUnwrapper};
use alloy_primitives::Address;
use std::sync::Arc;
use tracing::info;
use warden_core::{
    AdapterConfig, Avatar, EventSink, TransactionUnwrapper, UnwrapperKind, WardenResult,
};

/// A configured adapter and the shared state it was built over
#[derive(Debug)]
pub struct AdapterDeployment {
    /// Gate modules call into
    pub adapter: ModuleAdapter,
    /// Enabled modules, administered by the owner
    pub modules: Arc<ModuleSet>,
    /// Unwrapper bindings, administered by the owner
    pub registry: Arc<UnwrapperRegistry>,
}

/// Instantiate an unwrapper of the given kind
pub fn unwrapper_for(kind: UnwrapperKind, id: Address) -> Arc<dyn TransactionUnwrapper> {
    match kind {
        UnwrapperKind::Packed => Arc::new(PackedBatchUnwrapper::new(id)),
        UnwrapperKind::Multisend => Arc::new(MultisendCallUnwrapper::new(id)),
    }
}

/// Validate `config` and build the adapter over `avatar`
///
/// Configured modules and unwrapper bindings are applied as the owner, so the
/// same checks and events apply as for later administrative calls. The
/// configured log filter must parse even though no subscriber is installed.
pub fn setup_adapter(
    config: &AdapterConfig,
    avatar: Arc<dyn Avatar>,
    events: Arc<dyn EventSink>,
) -> WardenResult<AdapterDeployment> {
    config.validate()?;
    parse_filter(&config.log_filter)?;
    let owner = config.owner;

    let registry = Arc::new(UnwrapperRegistry::new(owner, events.clone()));
    for binding in &config.unwrappers {
        registry.bind(
            binding.target,
            unwrapper_for(binding.kind, binding.unwrapper),
            owner,
        )?;
    }

    let modules = Arc::new(ModuleSet::new(owner, events.clone()));
    for module in &config.modules {
        modules.enable_module(*module, owner)?;
    }

    let adapter = ModuleAdapter::new(owner, avatar, modules.clone(), registry.clone(), events);
    info!(
        owner = %owner,
        avatar = %adapter.avatar(),
        modules = config.modules.len(),
        unwrappers = config.unwrappers.len(),
        "Module adapter ready"
    );

    Ok(AdapterDeployment {
        adapter,
        modules,
        registry,
    })
}

/// [`setup_adapter`] with events logged through [`TracingEventSink`]
pub fn setup_traced_adapter(
    config: &AdapterConfig,
    avatar: Arc<dyn Avatar>,
) -> WardenResult<AdapterDeployment> {
    setup_adapter(config, avatar, Arc::new(TracingEventSink))
}
