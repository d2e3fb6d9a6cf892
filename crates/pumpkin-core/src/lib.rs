#![doc = r"Layout states for UI element trees: register states, resolve their target elements once, apply them on demand."]

pub mod collections;
pub mod element;
pub mod manager;
pub mod observer;
pub mod scan;
pub mod state;
pub mod target_index;

pub use element::{Element, ElementId, ElementRef};
pub use manager::{Builder, LayoutStateManager, ManagerHandle};
pub use observer::{LayoutObserver, ListenerId};
pub use scan::{scan, ScanOutcome};
pub use state::{LayoutState, RegistryError, StateKind, StateRegistry};
pub use target_index::TargetIndex;

pub mod prelude {
    pub use crate::element::{Element, ElementId, ElementRef};
    pub use crate::manager::{LayoutStateManager, ManagerHandle};
    pub use crate::state::{LayoutState, StateKind};
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
