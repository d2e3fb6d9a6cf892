use std::fmt;

use indexmap::IndexMap;

use crate::collections::map::HashSet;
use crate::element::ElementId;
use crate::manager::ManagerHandle;

/// Stable token naming one layout state. Chosen by the state author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKind(&'static str);

impl StateKind {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A bundle of view-property mutations that can be applied to a tree.
///
/// `setup` and `target_ids` are each called once while the manager is being
/// built; target lookups through the handle only succeed after that, from
/// inside `apply_changes` / `apply_changes_without_animation`. A state must
/// tolerate targets that resolve to `None`.
pub trait LayoutState: 'static {
    fn kind(&self) -> StateKind;

    fn setup(&mut self, _manager: ManagerHandle) {}

    fn target_ids(&self) -> Vec<ElementId>;

    fn apply_changes(&self);

    fn apply_changes_without_animation(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateKind { kind: StateKind },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateKind { kind } => {
                write!(f, "layout state {kind} is already registered")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Registered states keyed by kind, in registration order.
#[derive(Default)]
pub struct StateRegistry {
    states: IndexMap<StateKind, Box<dyn LayoutState>>,
}

impl StateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any state already registered under the same kind.
    pub fn insert(&mut self, state: Box<dyn LayoutState>) {
        let kind = state.kind();
        if self.states.insert(kind, state).is_some() {
            log::debug!("layout state {kind} replaced by a later registration");
        }
    }

    pub fn try_insert(&mut self, state: Box<dyn LayoutState>) -> Result<(), RegistryError> {
        let kind = state.kind();
        if self.states.contains_key(&kind) {
            return Err(RegistryError::DuplicateKind { kind });
        }
        self.states.insert(kind, state);
        Ok(())
    }

    pub fn get(&self, kind: StateKind) -> Option<&dyn LayoutState> {
        self.states.get(&kind).map(|state| &**state)
    }

    pub fn contains(&self, kind: StateKind) -> bool {
        self.states.contains_key(&kind)
    }

    pub fn kinds(&self) -> Vec<StateKind> {
        self.states.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub(crate) fn setup_all(&mut self, manager: &ManagerHandle) {
        for state in self.states.values_mut() {
            state.setup(manager.clone());
        }
    }

    /// Union of every state's declared targets.
    pub(crate) fn target_ids(&self) -> HashSet<ElementId> {
        self.states
            .values()
            .flat_map(|state| state.target_ids())
            .collect()
    }
}

impl fmt::Debug for StateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
