use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pumpkin_core::{Element, ElementId, LayoutState, ManagerHandle, StateKind};
use pumpkin_views::{Size, View};

/// What a [`RecordingState`] was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Animated { kind: StateKind, found: Vec<ElementId> },
    Immediate { kind: StateKind, found: Vec<ElementId> },
}

/// Shared, ordered record of callbacks across several recording states.
#[derive(Clone, Default)]
pub struct ApplyLog {
    entries: Rc<RefCell<Vec<Applied>>>,
}

impl ApplyLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Applied> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    fn push(&self, applied: Applied) {
        self.entries.borrow_mut().push(applied);
    }
}

/// Layout state that changes nothing and records which of its targets
/// resolved each time it is applied.
pub struct RecordingState {
    kind: StateKind,
    targets: Vec<ElementId>,
    log: ApplyLog,
    manager: Option<ManagerHandle>,
    setups: Rc<Cell<usize>>,
    target_requests: Rc<Cell<usize>>,
}

impl RecordingState {
    pub fn new(kind: StateKind, targets: &[ElementId], log: &ApplyLog) -> Self {
        Self {
            kind,
            targets: targets.to_vec(),
            log: log.clone(),
            manager: None,
            setups: Rc::new(Cell::new(0)),
            target_requests: Rc::new(Cell::new(0)),
        }
    }

    /// Counter of `setup` calls, readable after the state has moved into a manager.
    pub fn setup_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.setups)
    }

    pub fn target_request_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.target_requests)
    }

    fn found(&self) -> Vec<ElementId> {
        let Some(manager) = &self.manager else {
            return Vec::new();
        };
        self.targets
            .iter()
            .copied()
            .filter(|id| manager.find_view_by(*id).is_some())
            .collect()
    }
}

impl LayoutState for RecordingState {
    fn kind(&self) -> StateKind {
        self.kind
    }

    fn setup(&mut self, manager: ManagerHandle) {
        self.setups.set(self.setups.get() + 1);
        self.manager = Some(manager);
    }

    fn target_ids(&self) -> Vec<ElementId> {
        self.target_requests.set(self.target_requests.get() + 1);
        self.targets.clone()
    }

    fn apply_changes(&self) {
        self.log.push(Applied::Animated {
            kind: self.kind,
            found: self.found(),
        });
    }

    fn apply_changes_without_animation(&self) {
        self.log.push(Applied::Immediate {
            kind: self.kind,
            found: self.found(),
        });
    }
}

/// Element that panics as soon as anything asks for its id or children.
/// Place it where a correct scan must never reach.
pub struct PoisonedElement {
    label: &'static str,
}

impl PoisonedElement {
    pub fn new(label: &'static str) -> Rc<Self> {
        Rc::new(Self { label })
    }
}

impl Element for PoisonedElement {
    fn element_id(&self) -> Option<ElementId> {
        panic!("poisoned element {} was visited", self.label);
    }

    fn children(&self) -> Vec<Rc<dyn Element>> {
        panic!("poisoned element {} was expanded", self.label);
    }
}

/// Element wrapper with a fixed child list of arbitrary element types,
/// used to mix poisoned elements into otherwise ordinary trees.
pub struct MixedElement {
    id: Option<ElementId>,
    children: Vec<Rc<dyn Element>>,
    visits: Cell<usize>,
}

impl MixedElement {
    pub fn new(id: Option<ElementId>, children: Vec<Rc<dyn Element>>) -> Rc<Self> {
        Rc::new(Self {
            id,
            children,
            visits: Cell::new(0),
        })
    }

    pub fn visits(&self) -> usize {
        self.visits.get()
    }
}

impl Element for MixedElement {
    fn element_id(&self) -> Option<ElementId> {
        self.visits.set(self.visits.get() + 1);
        self.id
    }

    fn children(&self) -> Vec<Rc<dyn Element>> {
        self.children.clone()
    }
}

/// `root{a(1){b(2), c(3)}}`.
pub fn abc_tree() -> Rc<View> {
    View::root(
        "root",
        vec![View::group(
            "a",
            Some(1),
            vec![
                View::leaf("b", 2, Size::new(10.0, 10.0)),
                View::leaf("c", 3, Size::new(10.0, 10.0)),
            ],
        )],
    )
}

/// Root with `groups` groups of `leaves_per_group` leaves. Group `g` has id
/// `g * 1000`; its leaf `l` has id `g * 1000 + l + 1`.
pub fn wide_tree(groups: usize, leaves_per_group: usize) -> Rc<View> {
    let children = (0..groups)
        .map(|group| {
            let base = (group * 1000) as ElementId;
            let leaves = (0..leaves_per_group)
                .map(|leaf| {
                    View::leaf(
                        format!("leaf-{group}-{leaf}"),
                        base + leaf as ElementId + 1,
                        Size::new(10.0, 10.0),
                    )
                })
                .collect();
            View::group(format!("group-{group}"), Some(base), leaves)
        })
        .collect();
    View::root("wide", children)
}

/// Linear chain of `depth` groups ending in a leaf with id `depth`.
pub fn deep_chain(depth: usize) -> Rc<View> {
    let mut current = View::leaf("bottom", depth as ElementId, Size::new(1.0, 1.0));
    for level in (0..depth).rev() {
        current = View::group(format!("level-{level}"), None, vec![current]);
    }
    View::root("deep", vec![current])
}
