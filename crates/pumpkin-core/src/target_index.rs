use std::rc::Rc;

use crate::collections::map::{HashMap, HashSet};
use crate::element::{Element, ElementId, ElementRef};
use crate::scan::scan;

/// Identifier to element mapping, resolved once and never mutated.
#[derive(Debug, Default, Clone)]
pub struct TargetIndex {
    targets: HashMap<ElementId, ElementRef>,
}

impl TargetIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Scans `root` until every id in `needed` has been found.
    ///
    /// The first element carrying a needed id in breadth-first order wins.
    /// Ids that never turn up are left out; they are not looked for again.
    pub fn resolve(root: &Rc<dyn Element>, needed: HashSet<ElementId>) -> Self {
        let mut targets = HashMap::default();
        if needed.is_empty() {
            return Self { targets };
        }
        let requested = needed.len();
        let mut remaining = needed;
        let outcome = scan(root, |element| {
            if let Some(id) = element.element_id() {
                if remaining.remove(&id) {
                    targets.insert(id, ElementRef::new(element));
                }
            }
            remaining.is_empty()
        });
        log::debug!(
            "resolved {}/{} layout targets after visiting {} elements (early exit: {})",
            targets.len(),
            requested,
            outcome.visited,
            outcome.completed
        );
        if !remaining.is_empty() {
            let mut missing: Vec<ElementId> = remaining.into_iter().collect();
            missing.sort_unstable();
            log::debug!("layout targets not present in tree: {missing:?}");
        }
        Self { targets }
    }

    pub fn get(&self, id: ElementId) -> Option<&ElementRef> {
        self.targets.get(&id)
    }

    pub fn find(&self, id: ElementId) -> Option<Rc<dyn Element>> {
        self.targets.get(&id).and_then(ElementRef::resolve)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.targets.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Resolved ids in ascending order.
    pub fn ids(&self) -> Vec<ElementId> {
        let mut ids: Vec<ElementId> = self.targets.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
#[path = "tests/target_index_tests.rs"]
mod tests;
