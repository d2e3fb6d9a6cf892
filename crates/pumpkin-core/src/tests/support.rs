use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::{Element, ElementId, LayoutObserver, LayoutState, ManagerHandle, StateKind};

pub(crate) struct TestElement {
    pub name: &'static str,
    id: Option<ElementId>,
    children: RefCell<Vec<Rc<TestElement>>>,
    observer: Option<LayoutObserver>,
    poisoned: bool,
    pub id_reads: Cell<usize>,
}

impl TestElement {
    fn build(name: &'static str, id: Option<ElementId>, children: Vec<Rc<TestElement>>) -> Self {
        Self {
            name,
            id,
            children: RefCell::new(children),
            observer: None,
            poisoned: false,
            id_reads: Cell::new(0),
        }
    }

    pub fn remove_child(&self, name: &str) {
        self.children.borrow_mut().retain(|child| child.name != name);
    }
}

impl Element for TestElement {
    fn element_id(&self) -> Option<ElementId> {
        if self.poisoned {
            panic!("poisoned element {} visited", self.name);
        }
        self.id_reads.set(self.id_reads.get() + 1);
        self.id
    }

    fn children(&self) -> Vec<Rc<dyn Element>> {
        self.children
            .borrow()
            .iter()
            .map(|child| Rc::clone(child) as Rc<dyn Element>)
            .collect()
    }

    fn layout_observer(&self) -> Option<&LayoutObserver> {
        self.observer.as_ref()
    }
}

pub(crate) fn node(
    name: &'static str,
    id: Option<ElementId>,
    children: Vec<Rc<TestElement>>,
) -> Rc<TestElement> {
    Rc::new(TestElement::build(name, id, children))
}

pub(crate) fn leaf(name: &'static str, id: ElementId) -> Rc<TestElement> {
    node(name, Some(id), Vec::new())
}

pub(crate) fn container(name: &'static str, children: Vec<Rc<TestElement>>) -> Rc<TestElement> {
    let mut element = TestElement::build(name, None, children);
    element.observer = Some(LayoutObserver::new());
    Rc::new(element)
}

pub(crate) fn poisoned(name: &'static str) -> Rc<TestElement> {
    let mut element = TestElement::build(name, None, Vec::new());
    element.poisoned = true;
    Rc::new(element)
}

pub(crate) fn as_element(element: &Rc<TestElement>) -> Rc<dyn Element> {
    Rc::clone(element) as Rc<dyn Element>
}

pub(crate) fn name_of(element: &Rc<dyn Element>) -> &'static str {
    element
        .downcast_ref::<TestElement>()
        .map(|element| element.name)
        .unwrap_or("?")
}

pub(crate) type EventLog = Rc<RefCell<Vec<String>>>;

/// Records every callback it receives together with the targets it could
/// resolve at that moment.
pub(crate) struct ProbeState {
    kind: StateKind,
    targets: Vec<ElementId>,
    log: EventLog,
    handle: Option<ManagerHandle>,
}

impl ProbeState {
    pub fn new(kind: StateKind, targets: &[ElementId], log: &EventLog) -> Self {
        Self {
            kind,
            targets: targets.to_vec(),
            log: Rc::clone(log),
            handle: None,
        }
    }

    fn resolved(&self) -> Vec<&'static str> {
        let Some(handle) = &self.handle else {
            return Vec::new();
        };
        self.targets
            .iter()
            .filter_map(|id| handle.find_view_by(*id))
            .map(|element| name_of(&element))
            .collect()
    }

    fn record(&self, event: &str) {
        let entry = format!("{}:{}:{:?}", self.kind, event, self.resolved());
        self.log.borrow_mut().push(entry);
    }
}

impl LayoutState for ProbeState {
    fn kind(&self) -> StateKind {
        self.kind
    }

    fn setup(&mut self, manager: ManagerHandle) {
        self.handle = Some(manager);
        self.record("setup");
    }

    fn target_ids(&self) -> Vec<ElementId> {
        self.log
            .borrow_mut()
            .push(format!("{}:target_ids", self.kind));
        self.targets.clone()
    }

    fn apply_changes(&self) {
        self.record("animated");
    }

    fn apply_changes_without_animation(&self) {
        self.record("immediate");
    }
}

pub(crate) fn events(log: &EventLog) -> Vec<String> {
    log.borrow().clone()
}
