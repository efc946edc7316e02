//! Authorization gate and executor
//!
//! Every invocation runs the same three steps:
//!
//! 1. **Authorize**: the caller must be an enabled module.
//! 2. **Convert**: the request becomes an ordered action batch.
//! 3. **Submit**: the batch goes to the avatar, which executes it atomically.
//!
//! Converter and avatar failures are returned unchanged. A success emits
//! `ExecutionFromModuleSuccess` tagged with the caller.

use crate::converter::TransactionConverter;
use crate::registry::UnwrapperRegistry;
use alloy_primitives::{Address, Bytes, U256};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use warden_core::{
    AdapterEvent, Avatar, CallDescriptor, CallMode, EventSink, ModuleMembership, WardenError,
    WardenResult,
};

/// Gate between enabled modules and the avatar
pub struct ModuleAdapter {
    owner: Address,
    avatar: Arc<dyn Avatar>,
    modules: Arc<dyn ModuleMembership>,
    converter: TransactionConverter,
    events: Arc<dyn EventSink>,
}

impl ModuleAdapter {
    /// Create a gate over `avatar`, admitting callers enabled in `modules`
    pub fn new(
        owner: Address,
        avatar: Arc<dyn Avatar>,
        modules: Arc<dyn ModuleMembership>,
        registry: Arc<UnwrapperRegistry>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            owner,
            avatar,
            modules,
            converter: TransactionConverter::new(registry),
            events,
        }
    }

    /// Administrative identity
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Identity of the avatar actions are submitted to
    pub fn avatar(&self) -> Address {
        self.avatar.address()
    }

    /// Unwrapper registry consulted for delegated requests
    pub fn registry(&self) -> &Arc<UnwrapperRegistry> {
        self.converter.registry()
    }

    fn authorize(&self, caller: Address) -> WardenResult<()> {
        if self.modules.is_module_enabled(&caller) {
            Ok(())
        } else {
            warn!(caller = %caller, "Rejected call from module that is not enabled");
            Err(WardenError::not_authorized(caller))
        }
    }

    fn submit(&self, caller: Address, request: &CallDescriptor) -> WardenResult<Vec<Bytes>> {
        self.authorize(caller)?;

        let actions = self.converter.convert_transaction(request)?;
        debug!(
            module = %caller,
            target = %request.target,
            mode = %request.mode,
            actions = actions.len(),
            "Submitting actions to avatar"
        );

        let outputs = self.avatar.execute(&actions).map_err(|err| {
            warn!(module = %caller, error = %err, "Avatar rejected action batch");
            WardenError::from(err)
        })?;

        info!(module = %caller, actions = actions.len(), "Execution from module succeeded");
        self.events
            .emit(AdapterEvent::ExecutionFromModuleSuccess { module: caller });
        Ok(outputs)
    }

    /// Authorize, convert and execute `request` for `caller`
    pub fn exec(&self, caller: Address, request: &CallDescriptor) -> WardenResult<()> {
        self.submit(caller, request).map(|_| ())
    }

    /// Like [`exec`](Self::exec), returning one output buffer per executed action
    pub fn exec_and_return_data(
        &self,
        caller: Address,
        request: &CallDescriptor,
    ) -> WardenResult<Vec<Bytes>> {
        self.submit(caller, request)
    }

    /// Module entry point; returns `true` when the avatar executed the batch
    pub fn exec_transaction_from_module(
        &self,
        caller: Address,
        to: Address,
        value: U256,
        data: Bytes,
        operation: CallMode,
    ) -> WardenResult<bool> {
        let request = CallDescriptor::new(to, value, data, operation);
        self.exec(caller, &request).map(|()| true)
    }

    /// Module entry point returning the outputs of all actions concatenated in order
    pub fn exec_transaction_from_module_return_data(
        &self,
        caller: Address,
        to: Address,
        value: U256,
        data: Bytes,
        operation: CallMode,
    ) -> WardenResult<(bool, Bytes)> {
        let request = CallDescriptor::new(to, value, data, operation);
        let outputs = self.exec_and_return_data(caller, &request)?;
        let return_data: Vec<u8> = outputs.iter().flat_map(|out| out.iter().copied()).collect();
        Ok((true, return_data.into()))
    }
}

impl fmt::Debug for ModuleAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleAdapter")
            .field("owner", &self.owner)
            .field("avatar", &self.avatar.address())
            .field("converter", &self.converter)
            .finish_non_exhaustive()
    }
}
