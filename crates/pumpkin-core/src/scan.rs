use std::collections::VecDeque;
use std::rc::Rc;

use crate::element::Element;

/// Result of a single [`scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanOutcome {
    pub visited: usize,
    /// `true` when the visitor ended the scan before the tree was exhausted.
    pub completed: bool,
}

/// Breadth-first walk starting at `root`.
///
/// `visit` runs once per element, root first, then each level left to right.
/// Returning `true` stops the walk at once: queued elements are dropped and
/// the children of the completing element are never enqueued.
pub fn scan(
    root: &Rc<dyn Element>,
    mut visit: impl FnMut(&Rc<dyn Element>) -> bool,
) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    let mut queue: VecDeque<Rc<dyn Element>> = VecDeque::new();
    queue.push_back(Rc::clone(root));
    while let Some(element) = queue.pop_front() {
        outcome.visited += 1;
        if visit(&element) {
            outcome.completed = true;
            return outcome;
        }
        queue.extend(element.children());
    }
    outcome
}

#[cfg(test)]
#[path = "tests/scan_tests.rs"]
mod tests;
