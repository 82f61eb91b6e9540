//! Syncing externally controlled key lists into the engine.
//!
//! A controlled list is recognized by identity, not content: handing in a
//! new `Arc` replaces the internal set even if the keys are the same, while
//! handing the same `Arc` back changes nothing. Keep the `Arc` around between
//! updates to avoid resetting user changes.

use std::sync::Arc;

use log::debug;

use crate::key::KeySet;
use crate::state::EngineState;

/// Externally supplied open/selected keys. `None` means uncontrolled.
#[derive(Debug, Clone, Default)]
pub struct ExternalKeys {
    pub open_keys: Option<Arc<KeySet>>,
    pub selected_keys: Option<Arc<KeySet>>,
}

impl ExternalKeys {
    /// No controlled lists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Control the open keys.
    pub fn with_open_keys(mut self, keys: Arc<KeySet>) -> Self {
        self.open_keys = Some(keys);
        self
    }

    /// Control the selected keys.
    pub fn with_selected_keys(mut self, keys: Arc<KeySet>) -> Self {
        self.selected_keys = Some(keys);
        self
    }
}

/// Which sets a reconcile pass replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reconciled {
    pub open_keys: bool,
    pub selected_keys: bool,
}

impl Reconciled {
    /// Whether anything was replaced.
    pub fn any(&self) -> bool {
        self.open_keys || self.selected_keys
    }
}

/// Remembers the last external lists seen.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    last: ExternalKeys,
}

fn same_list(a: &Option<Arc<KeySet>>, b: &Option<Arc<KeySet>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}

fn copy_of(list: &Option<Arc<KeySet>>) -> KeySet {
    list.as_deref().cloned().unwrap_or_default()
}

impl Reconciler {
    /// Seed fresh engine state from the initial external lists.
    ///
    /// `half_checked_keys` starts as a copy of the selected keys and is not
    /// touched again.
    pub fn initial_state(external: &ExternalKeys) -> (Self, EngineState) {
        let selected_keys = copy_of(&external.selected_keys);
        let state = EngineState {
            open_keys: copy_of(&external.open_keys),
            half_checked_keys: selected_keys.clone(),
            selected_keys,
        };
        let reconciler = Self {
            last: external.clone(),
        };
        (reconciler, state)
    }

    /// Replace each internal set whose external list changed identity.
    pub fn reconcile(&mut self, external: &ExternalKeys, state: &mut EngineState) -> Reconciled {
        let mut result = Reconciled::default();

        if !same_list(&self.last.open_keys, &external.open_keys) {
            state.open_keys = copy_of(&external.open_keys);
            result.open_keys = true;
        }
        if !same_list(&self.last.selected_keys, &external.selected_keys) {
            state.selected_keys = copy_of(&external.selected_keys);
            result.selected_keys = true;
        }

        if result.any() {
            debug!(
                "Reconciled external keys: open={}, selected={}",
                result.open_keys, result.selected_keys
            );
        }
        self.last = external.clone();
        result
    }
}
