//! In-memory module set
//!
//! Owner-administered set of modules allowed to call the adapter. Modules are
//! listed most recently enabled first, and pages are addressed by the last
//! module of the previous page (or the sentinel for the first page).

use alloy_primitives::Address;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;
use warden_core::{
    AdapterEvent, EventSink, ModuleMembership, WardenError, WardenResult, SENTINEL_MODULE,
};

/// Enabled modules with owner-gated mutation
pub struct ModuleSet {
    owner: Address,
    modules: RwLock<Vec<Address>>,
    events: Arc<dyn EventSink>,
}

impl ModuleSet {
    /// Create an empty set administered by `owner`
    pub fn new(owner: Address, events: Arc<dyn EventSink>) -> Self {
        Self {
            owner,
            modules: RwLock::new(Vec::new()),
            events,
        }
    }

    fn ensure_owner(&self, caller: Address) -> WardenResult<()> {
        if caller == self.owner {
            Ok(())
        } else {
            Err(WardenError::not_authorized(caller))
        }
    }

    fn ensure_valid(module: Address) -> WardenResult<()> {
        if module == Address::ZERO || module == SENTINEL_MODULE {
            Err(WardenError::InvalidModule { module })
        } else {
            Ok(())
        }
    }

    /// Enable `module` on behalf of `caller`
    pub fn enable_module(&self, module: Address, caller: Address) -> WardenResult<()> {
        self.ensure_owner(caller)?;
        Self::ensure_valid(module)?;
        {
            let mut modules = self.modules.write();
            if modules.contains(&module) {
                return Err(WardenError::AlreadyEnabledModule { module });
            }
            modules.insert(0, module);
        }
        info!(module = %module, "Enabled module");
        self.events.emit(AdapterEvent::EnabledModule { module });
        Ok(())
    }

    /// Disable `module` on behalf of `caller`
    pub fn disable_module(&self, module: Address, caller: Address) -> WardenResult<()> {
        self.ensure_owner(caller)?;
        Self::ensure_valid(module)?;
        {
            let mut modules = self.modules.write();
            let Some(index) = modules.iter().position(|m| *m == module) else {
                return Err(WardenError::AlreadyDisabledModule { module });
            };
            modules.remove(index);
        }
        info!(module = %module, "Disabled module");
        self.events.emit(AdapterEvent::DisabledModule { module });
        Ok(())
    }

    /// Up to `page_size` modules following `start`
    ///
    /// Returns the page and the cursor for the next page: the last module of
    /// this page when more remain, otherwise the sentinel.
    pub fn modules_paginated(
        &self,
        start: Address,
        page_size: usize,
    ) -> WardenResult<(Vec<Address>, Address)> {
        let modules = self.modules.read();
        let first = if start == SENTINEL_MODULE {
            0
        } else {
            modules
                .iter()
                .position(|m| *m == start)
                .map(|index| index + 1)
                .ok_or(WardenError::InvalidModule { module: start })?
        };
        if page_size == 0 {
            return Err(WardenError::InvalidPageSize);
        }

        let page: Vec<Address> = modules.iter().skip(first).take(page_size).copied().collect();
        let next = match page.last() {
            Some(last) if first + page.len() < modules.len() => *last,
            _ => SENTINEL_MODULE,
        };
        Ok((page, next))
    }
}

impl ModuleMembership for ModuleSet {
    fn is_module_enabled(&self, module: &Address) -> bool {
        self.modules.read().contains(module)
    }
}

impl std::fmt::Debug for ModuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleSet")
            .field("owner", &self.owner)
            .field("modules", &*self.modules.read())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NoopEventSink;

    const OWNER: Address = Address::repeat_byte(0x0a);

    fn module(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn set_with(modules: &[u8]) -> ModuleSet {
        let set = ModuleSet::new(OWNER, Arc::new(NoopEventSink));
        for byte in modules {
            set.enable_module(module(*byte), OWNER).unwrap();
        }
        set
    }

    #[test]
    fn test_enable_and_disable() {
        let set = set_with(&[0x01]);
        assert!(set.is_module_enabled(&module(0x01)));
        assert_eq!(
            set.enable_module(module(0x01), OWNER),
            Err(WardenError::AlreadyEnabledModule { module: module(0x01) })
        );

        set.disable_module(module(0x01), OWNER).unwrap();
        assert!(!set.is_module_enabled(&module(0x01)));
        assert_eq!(
            set.disable_module(module(0x01), OWNER),
            Err(WardenError::AlreadyDisabledModule { module: module(0x01) })
        );
    }

    #[test]
    fn test_only_owner_mutates() {
        let set = set_with(&[]);
        let stranger = module(0x0c);
        assert_eq!(
            set.enable_module(module(0x01), stranger),
            Err(WardenError::not_authorized(stranger))
        );
    }

    #[test]
    fn test_rejects_zero_and_sentinel() {
        let set = set_with(&[]);
        assert!(matches!(
            set.enable_module(Address::ZERO, OWNER),
            Err(WardenError::InvalidModule { .. })
        ));
        assert!(matches!(
            set.enable_module(SENTINEL_MODULE, OWNER),
            Err(WardenError::InvalidModule { .. })
        ));
    }

    #[test]
    fn test_pagination_walks_most_recent_first() {
        let set = set_with(&[0x01, 0x02, 0x03]);

        let (page, next) = set.modules_paginated(SENTINEL_MODULE, 2).unwrap();
        assert_eq!(page, vec![module(0x03), module(0x02)]);
        assert_eq!(next, module(0x02));

        let (page, next) = set.modules_paginated(next, 2).unwrap();
        assert_eq!(page, vec![module(0x01)]);
        assert_eq!(next, SENTINEL_MODULE);
    }

    #[test]
    fn test_pagination_errors() {
        let set = set_with(&[0x01]);
        assert_eq!(
            set.modules_paginated(SENTINEL_MODULE, 0),
            Err(WardenError::InvalidPageSize)
        );
        assert_eq!(
            set.modules_paginated(module(0x09), 1),
            Err(WardenError::InvalidModule { module: module(0x09) })
        );
        assert_eq!(
            set_with(&[]).modules_paginated(SENTINEL_MODULE, 5),
            Ok((Vec::new(), SENTINEL_MODULE))
        );
    }
}
