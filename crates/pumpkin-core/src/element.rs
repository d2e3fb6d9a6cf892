use std::any::Any;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::observer::LayoutObserver;

pub type ElementId = i32;

/// A node of the host framework's view tree.
///
/// The framework owns every element; this crate only holds [`Weak`]
/// references to them. Mutable view properties live behind interior
/// mutability on the concrete type and are reached through
/// [`ElementRef::with`] or `downcast_ref`.
pub trait Element: Any {
    fn element_id(&self) -> Option<ElementId>;

    fn children(&self) -> Vec<Rc<dyn Element>> {
        Vec::new()
    }

    /// Layout-pass notifications, present on containers that run layout.
    fn layout_observer(&self) -> Option<&LayoutObserver> {
        None
    }
}

impl dyn Element {
    pub fn as_any(&self) -> &dyn Any {
        self
    }

    pub fn downcast_ref<E: Element>(&self) -> Option<&E> {
        self.as_any().downcast_ref::<E>()
    }
}

/// Non-owning reference to an element. Resolves to `None` once the
/// framework has destroyed the element.
#[derive(Clone)]
pub struct ElementRef {
    element: Weak<dyn Element>,
}

impl ElementRef {
    pub fn new(element: &Rc<dyn Element>) -> Self {
        Self {
            element: Rc::downgrade(element),
        }
    }

    pub fn resolve(&self) -> Option<Rc<dyn Element>> {
        self.element.upgrade()
    }

    pub fn is_live(&self) -> bool {
        self.element.strong_count() > 0
    }

    /// Resolves the element and hands it to `f` as its concrete type.
    pub fn with<E: Element, R>(&self, f: impl FnOnce(&E) -> R) -> Option<R> {
        let element = self.resolve()?;
        let typed = element.downcast_ref::<E>()?;
        Some(f(typed))
    }

    pub fn ptr_eq(&self, element: &Rc<dyn Element>) -> bool {
        std::ptr::addr_eq(self.element.as_ptr(), Rc::as_ptr(element))
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.resolve().and_then(|element| element.element_id());
        f.debug_struct("ElementRef")
            .field("live", &self.is_live())
            .field("id", &id)
            .finish()
    }
}
