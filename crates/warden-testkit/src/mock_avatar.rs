//! Mock avatar for deterministic testing
//!
//! Executes batches atomically against in-memory state:
//!
//! - an execute permission must be granted to the calling adapter first;
//! - actions targeting a configured failing address fail the whole batch;
//! - accepted batches are recorded in order for inspection;
//! - each action returns its payload prefixed with the target's last byte.

use alloy_primitives::{Address, Bytes};
use parking_lot::Mutex;
use std::collections::HashSet;
use warden_core::{Action, Avatar, AvatarError};

#[derive(Debug, Default)]
struct MockAvatarState {
    execute_permission: bool,
    failing_targets: HashSet<Address>,
    executed: Vec<Vec<Action>>,
    attempts: usize,
}

/// In-memory avatar that records accepted batches
#[derive(Debug)]
pub struct MockAvatar {
    address: Address,
    state: Mutex<MockAvatarState>,
}

impl MockAvatar {
    /// Create an avatar that already grants execute permission
    pub fn new(address: Address) -> Self {
        let avatar = Self::without_permission(address);
        avatar.grant_execute_permission();
        avatar
    }

    /// Create an avatar that rejects every batch until permission is granted
    pub fn without_permission(address: Address) -> Self {
        Self {
            address,
            state: Mutex::new(MockAvatarState::default()),
        }
    }

    /// Allow the adapter to execute batches
    pub fn grant_execute_permission(&self) {
        self.state.lock().execute_permission = true;
    }

    /// Make every batch containing an action to `target` fail
    pub fn fail_on(&self, target: Address) {
        self.state.lock().failing_targets.insert(target);
    }

    /// Batches executed so far, in order
    pub fn executed(&self) -> Vec<Vec<Action>> {
        self.state.lock().executed.clone()
    }

    /// Most recently executed batch
    pub fn last_batch(&self) -> Option<Vec<Action>> {
        self.state.lock().executed.last().cloned()
    }

    /// Number of `execute` calls, successful or not
    pub fn attempts(&self) -> usize {
        self.state.lock().attempts
    }

    /// Output the mock returns for `action`
    pub fn output_for(action: &Action) -> Bytes {
        let mut out = Vec::with_capacity(action.payload.len() + 1);
        out.push(action.target.as_slice()[19]);
        out.extend_from_slice(&action.payload);
        out.into()
    }
}

impl Avatar for MockAvatar {
    fn address(&self) -> Address {
        self.address
    }

    fn execute(&self, actions: &[Action]) -> Result<Vec<Bytes>, AvatarError> {
        let mut state = self.state.lock();
        state.attempts += 1;

        if !state.execute_permission {
            return Err(AvatarError::new("caller lacks execute permission"));
        }
        if let Some(index) = actions
            .iter()
            .position(|action| state.failing_targets.contains(&action.target))
        {
            return Err(AvatarError::at_action(index, "action reverted"));
        }

        state.executed.push(actions.to_vec());
        Ok(actions.iter().map(Self::output_for).collect())
    }
}
