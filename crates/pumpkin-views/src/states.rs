use pumpkin_core::{ElementId, LayoutState, ManagerHandle, StateKind};

use crate::view::{Size, View, Visibility};

/// One property assignment made by a [`PropertyState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Change {
    Visibility(Visibility),
    Alpha(f32),
    TranslationY(f32),
    PreferredSize(Size),
}

impl Change {
    fn apply_to(&self, view: &View) {
        match *self {
            Change::Visibility(visibility) => view.set_visibility(visibility),
            Change::Alpha(alpha) => view.set_alpha(alpha),
            Change::TranslationY(translation) => view.set_translation_y(translation),
            Change::PreferredSize(size) => view.set_preferred_size(size),
        }
    }
}

/// Layout state made of fixed property assignments on views found by id.
///
/// The animated variant opens a transition on the root view before
/// assigning. Targets that have disappeared are skipped.
pub struct PropertyState {
    kind: StateKind,
    changes: Vec<(ElementId, Change)>,
    manager: Option<ManagerHandle>,
}

impl PropertyState {
    pub fn new(kind: StateKind) -> Self {
        Self {
            kind,
            changes: Vec::new(),
            manager: None,
        }
    }

    pub fn set(mut self, id: ElementId, change: Change) -> Self {
        self.changes.push((id, change));
        self
    }

    pub fn changes(&self) -> &[(ElementId, Change)] {
        &self.changes
    }

    fn assign(&self) {
        let Some(manager) = &self.manager else {
            return;
        };
        for (id, change) in &self.changes {
            if manager
                .find_view_as::<View, _>(*id, |view| change.apply_to(view))
                .is_none()
            {
                log::trace!("{}: target {id} is gone, skipping {change:?}", self.kind);
            }
        }
    }
}

impl LayoutState for PropertyState {
    fn kind(&self) -> StateKind {
        self.kind
    }

    fn setup(&mut self, manager: ManagerHandle) {
        self.manager = Some(manager);
    }

    fn target_ids(&self) -> Vec<ElementId> {
        let mut ids: Vec<ElementId> = self.changes.iter().map(|(id, _)| *id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    fn apply_changes(&self) {
        if let Some(root) = self.manager.as_ref().and_then(ManagerHandle::root) {
            if let Some(view) = root.downcast_ref::<View>() {
                view.begin_transition();
            }
        }
        self.assign();
    }

    fn apply_changes_without_animation(&self) {
        self.assign();
    }
}

#[cfg(test)]
#[path = "tests/states_tests.rs"]
mod tests;
