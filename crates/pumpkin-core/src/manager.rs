use std::fmt;
use std::rc::{Rc, Weak};

use crate::element::{Element, ElementId};
use crate::state::{LayoutState, RegistryError, StateKind, StateRegistry};
use crate::target_index::TargetIndex;

struct ManagerInner {
    root: Weak<dyn Element>,
    registry: StateRegistry,
    targets: TargetIndex,
}

/// Applies registered layout states to the tree under a root element.
///
/// Cloning is cheap and yields another handle to the same manager. Every
/// dispatch is a silent no-op when the state kind was never registered or
/// when the framework has already destroyed the root.
#[derive(Clone)]
pub struct LayoutStateManager {
    inner: Rc<ManagerInner>,
}

impl LayoutStateManager {
    pub fn setup_with(root: Rc<dyn Element>) -> Builder {
        Builder::new(root)
    }

    fn new(root: Weak<dyn Element>, mut registry: StateRegistry) -> Self {
        let inner = Rc::new_cyclic(|weak| {
            // The handle cannot upgrade until construction returns, so
            // lookups made from `setup` see nothing.
            let handle = ManagerHandle {
                inner: Weak::clone(weak),
            };
            registry.setup_all(&handle);
            let targets = match root.upgrade() {
                Some(root) => TargetIndex::resolve(&root, registry.target_ids()),
                None => {
                    log::warn!("building a layout state manager for a root that no longer exists");
                    TargetIndex::empty()
                }
            };
            log::debug!(
                "layout state manager ready: {} states, {} targets",
                registry.len(),
                targets.len()
            );
            ManagerInner {
                root,
                registry,
                targets,
            }
        });
        Self { inner }
    }

    /// Applies `kind` with animation.
    pub fn go(&self, kind: StateKind) {
        if let Some(state) = self.dispatch_target(kind) {
            state.apply_changes();
        }
    }

    /// Applies `kind` without animation.
    pub fn go_immediately(&self, kind: StateKind) {
        if let Some(state) = self.dispatch_target(kind) {
            state.apply_changes_without_animation();
        }
    }

    /// Applies `kind` without animation once the root finishes its next
    /// layout pass. The pending listener keeps this manager alive until it
    /// fires; it is dropped unfired together with the root.
    pub fn post_state(&self, kind: StateKind) {
        if !self.inner.registry.contains(kind) {
            log::trace!("not posting unregistered layout state {kind}");
            return;
        }
        let Some(root) = self.inner.root.upgrade() else {
            log::trace!("not posting layout state {kind}: root element is gone");
            return;
        };
        let Some(observer) = root.layout_observer() else {
            log::trace!("not posting layout state {kind}: root has no layout observer");
            return;
        };
        let manager = self.clone();
        let listener_id = observer.add_listener(move |id| {
            if let Some(root) = manager.inner.root.upgrade() {
                if let Some(observer) = root.layout_observer() {
                    observer.remove_listener(id);
                }
            }
            log::debug!("layout pass finished, applying posted state {kind}");
            manager.go_immediately(kind);
        });
        log::debug!("posted layout state {kind} as layout listener {listener_id}");
    }

    pub fn find_view_by(&self, id: ElementId) -> Option<Rc<dyn Element>> {
        self.inner.targets.find(id)
    }

    /// Resolves target `id` and hands it to `f` as its concrete type.
    pub fn find_view_as<E: Element, R>(&self, id: ElementId, f: impl FnOnce(&E) -> R) -> Option<R> {
        self.inner.targets.get(id)?.with(f)
    }

    pub fn root(&self) -> Option<Rc<dyn Element>> {
        self.inner.root.upgrade()
    }

    pub fn is_stale(&self) -> bool {
        self.inner.root.strong_count() == 0
    }

    pub fn has_state(&self, kind: StateKind) -> bool {
        self.inner.registry.contains(kind)
    }

    pub fn state_kinds(&self) -> Vec<StateKind> {
        self.inner.registry.kinds()
    }

    pub fn target_index(&self) -> &TargetIndex {
        &self.inner.targets
    }

    pub fn handle(&self) -> ManagerHandle {
        ManagerHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    fn dispatch_target(&self, kind: StateKind) -> Option<&dyn LayoutState> {
        if self.is_stale() {
            log::trace!("ignoring layout state {kind}: root element is gone");
            return None;
        }
        let state = self.inner.registry.get(kind);
        if state.is_none() {
            log::trace!("ignoring unregistered layout state {kind}");
        }
        state
    }
}

impl fmt::Debug for LayoutStateManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutStateManager")
            .field("stale", &self.is_stale())
            .field("states", &self.inner.registry)
            .field("targets", &self.inner.targets.ids())
            .finish()
    }
}

/// Weak handle given to layout states during setup.
///
/// Lookups return `None` and dispatches do nothing once the manager has been
/// dropped, and also while it is still being constructed.
#[derive(Clone)]
pub struct ManagerHandle {
    inner: Weak<ManagerInner>,
}

impl ManagerHandle {
    pub fn upgrade(&self) -> Option<LayoutStateManager> {
        self.inner.upgrade().map(|inner| LayoutStateManager { inner })
    }

    pub fn find_view_by(&self, id: ElementId) -> Option<Rc<dyn Element>> {
        self.upgrade()?.find_view_by(id)
    }

    pub fn find_view_as<E: Element, R>(&self, id: ElementId, f: impl FnOnce(&E) -> R) -> Option<R> {
        self.upgrade()?.find_view_as(id, f)
    }

    pub fn root(&self) -> Option<Rc<dyn Element>> {
        self.upgrade()?.root()
    }

    pub fn go(&self, kind: StateKind) {
        if let Some(manager) = self.upgrade() {
            manager.go(kind);
        }
    }

    pub fn go_immediately(&self, kind: StateKind) {
        if let Some(manager) = self.upgrade() {
            manager.go_immediately(kind);
        }
    }

    pub fn post_state(&self, kind: StateKind) {
        if let Some(manager) = self.upgrade() {
            manager.post_state(kind);
        }
    }
}

impl fmt::Debug for ManagerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerHandle")
            .field("live", &(self.inner.strong_count() > 0))
            .finish()
    }
}

/// Collects layout states for a root element before building the manager.
pub struct Builder {
    root: Weak<dyn Element>,
    registry: StateRegistry,
}

impl Builder {
    fn new(root: Rc<dyn Element>) -> Self {
        Self {
            root: Rc::downgrade(&root),
            registry: StateRegistry::new(),
        }
    }

    /// Registers `state` under its kind, replacing an earlier registration.
    pub fn add_state(self, state: impl LayoutState) -> Self {
        self.add_boxed_state(Box::new(state))
    }

    pub fn add_boxed_state(mut self, state: Box<dyn LayoutState>) -> Self {
        self.registry.insert(state);
        self
    }

    /// Registers `state`, refusing a kind that is already registered.
    pub fn try_add_state(mut self, state: impl LayoutState) -> Result<Self, RegistryError> {
        self.registry.try_insert(Box::new(state))?;
        Ok(self)
    }

    pub fn build(self) -> LayoutStateManager {
        LayoutStateManager::new(self.root, self.registry)
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("states", &self.registry)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/manager_tests.rs"]
mod tests;
