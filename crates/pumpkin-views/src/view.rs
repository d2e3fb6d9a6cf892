use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use pumpkin_core::{Element, ElementId, LayoutObserver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Invisible,
    Gone,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    MissingChild { parent: String, child: String },
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewError::MissingChild { parent, child } => {
                write!(f, "view {parent} has no child named {child}")
            }
        }
    }
}

impl std::error::Error for ViewError {}

/// A view in a headless tree. Groups stack their visible children
/// vertically; leaves report their preferred size.
pub struct View {
    name: String,
    id: Option<ElementId>,
    children: RefCell<Vec<Rc<View>>>,
    observer: Option<LayoutObserver>,
    visibility: Cell<Visibility>,
    alpha: Cell<f32>,
    translation_y: Cell<f32>,
    preferred: Cell<Size>,
    measured: Cell<Size>,
    transitions: Cell<usize>,
    layout_passes: Cell<usize>,
}

impl View {
    fn build(
        name: impl Into<String>,
        id: Option<ElementId>,
        children: Vec<Rc<View>>,
        observer: Option<LayoutObserver>,
    ) -> Self {
        Self {
            name: name.into(),
            id,
            children: RefCell::new(children),
            observer,
            visibility: Cell::new(Visibility::Visible),
            alpha: Cell::new(1.0),
            translation_y: Cell::new(0.0),
            preferred: Cell::new(Size::ZERO),
            measured: Cell::new(Size::ZERO),
            transitions: Cell::new(0),
            layout_passes: Cell::new(0),
        }
    }

    pub fn leaf(name: impl Into<String>, id: ElementId, preferred: Size) -> Rc<View> {
        let view = Self::build(name, Some(id), Vec::new(), None);
        view.preferred.set(preferred);
        Rc::new(view)
    }

    pub fn group(
        name: impl Into<String>,
        id: Option<ElementId>,
        children: Vec<Rc<View>>,
    ) -> Rc<View> {
        Rc::new(Self::build(name, id, children, None))
    }

    /// A top-level container that runs layout passes and notifies listeners.
    pub fn root(name: impl Into<String>, children: Vec<Rc<View>>) -> Rc<View> {
        Rc::new(Self::build(
            name,
            None,
            children,
            Some(LayoutObserver::new()),
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<ElementId> {
        self.id
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility.get()
    }

    pub fn set_visibility(&self, visibility: Visibility) {
        self.visibility.set(visibility);
    }

    pub fn alpha(&self) -> f32 {
        self.alpha.get()
    }

    pub fn set_alpha(&self, alpha: f32) {
        self.alpha.set(alpha.clamp(0.0, 1.0));
    }

    pub fn translation_y(&self) -> f32 {
        self.translation_y.get()
    }

    pub fn set_translation_y(&self, translation: f32) {
        self.translation_y.set(translation);
    }

    pub fn preferred_size(&self) -> Size {
        self.preferred.get()
    }

    pub fn set_preferred_size(&self, size: Size) {
        self.preferred.set(size);
    }

    /// Size computed by the most recent layout pass.
    pub fn measured_size(&self) -> Size {
        self.measured.get()
    }

    /// Marks the start of an animated change below this view.
    pub fn begin_transition(&self) {
        self.transitions.set(self.transitions.get() + 1);
    }

    pub fn transitions(&self) -> usize {
        self.transitions.get()
    }

    pub fn layout_passes(&self) -> usize {
        self.layout_passes.get()
    }

    pub fn child_views(&self) -> Vec<Rc<View>> {
        self.children.borrow().clone()
    }

    pub fn add_child(&self, child: Rc<View>) {
        self.children.borrow_mut().push(child);
    }

    pub fn remove_child(&self, name: &str) -> Result<Rc<View>, ViewError> {
        let mut children = self.children.borrow_mut();
        let index = children
            .iter()
            .position(|child| child.name == name)
            .ok_or_else(|| ViewError::MissingChild {
                parent: self.name.clone(),
                child: name.to_string(),
            })?;
        Ok(children.remove(index))
    }

    /// First view named `name` in breadth-first order, this view included.
    pub fn find_by_name(self: &Rc<Self>, name: &str) -> Option<Rc<View>> {
        let mut queue = VecDeque::from([Rc::clone(self)]);
        while let Some(view) = queue.pop_front() {
            if view.name == name {
                return Some(view);
            }
            queue.extend(view.child_views());
        }
        None
    }

    /// Measures the subtree, then notifies layout listeners on this view.
    pub fn perform_layout(&self) {
        let size = self.measure();
        self.layout_passes.set(self.layout_passes.get() + 1);
        log::trace!(
            "layout pass {} on {}: {}x{}",
            self.layout_passes.get(),
            self.name,
            size.width,
            size.height
        );
        if let Some(observer) = &self.observer {
            observer.dispatch_layout();
        }
    }

    fn measure(&self) -> Size {
        let size = if self.visibility.get() == Visibility::Gone {
            Size::ZERO
        } else {
            let children = self.child_views();
            if children.is_empty() {
                self.preferred.get()
            } else {
                let mut total = Size::ZERO;
                for child in &children {
                    let child_size = child.measure();
                    total.width = total.width.max(child_size.width);
                    total.height += child_size.height;
                }
                total
            }
        };
        self.measured.set(size);
        size
    }

    /// Indented outline of the subtree, one view per line.
    pub fn dump_tree(&self) -> String {
        let mut output = String::new();
        self.dump_into(&mut output, 0);
        output
    }

    fn dump_into(&self, output: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let id = self
            .id
            .map(|id| format!("#{id}"))
            .unwrap_or_else(|| "-".to_string());
        let size = self.measured.get();
        output.push_str(&format!(
            "{}{} [{}] {:?} alpha={:.2} ty={:.1} {}x{}\n",
            indent,
            self.name,
            id,
            self.visibility.get(),
            self.alpha.get(),
            self.translation_y.get(),
            size.width,
            size.height
        ));
        for child in self.children.borrow().iter() {
            child.dump_into(output, depth + 1);
        }
    }
}

impl Element for View {
    fn element_id(&self) -> Option<ElementId> {
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

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("visibility", &self.visibility.get())
            .field("children", &self.children.borrow().len())
            .finish()
    }
}

/// Logs the outline of `root` at debug level.
pub fn log_view_tree(root: &View) {
    log::debug!("view tree:\n{}", root.dump_tree());
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
