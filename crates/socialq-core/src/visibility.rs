//! One-shot viewport visibility notifications.
//!
//! The host feeds intersection ratios (for example from an
//! `IntersectionObserver`) into [`VisibilityObserver::report`]. Each observed
//! element gets its callback at most once: on the first report at or above
//! the threshold, after which it is no longer observed.

use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

/// Host-side identifier of an observed element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Fraction of an element that must be inside the viewport, as on the live page.
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.5;

type EnterCallback = Box<dyn FnOnce(ElementId) + 'static>;

/// Shared registry of elements waiting to become visible.
#[derive(Clone)]
pub struct VisibilityObserver {
    inner: Rc<VisibilityInner>,
}

struct VisibilityInner {
    threshold: f32,
    pending: RefCell<HashMap<ElementId, EnterCallback>>,
}

impl VisibilityObserver {
    pub fn new(threshold: f32) -> Self {
        let threshold = if threshold.is_finite() {
            threshold.clamp(0.0, 1.0)
        } else {
            DEFAULT_VISIBILITY_THRESHOLD
        };
        Self {
            inner: Rc::new(VisibilityInner {
                threshold,
                pending: RefCell::new(HashMap::new()),
            }),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.inner.threshold
    }

    /// Registers `on_enter` for `element`, replacing any earlier registration.
    pub fn observe(&self, element: ElementId, on_enter: impl FnOnce(ElementId) + 'static) {
        let replaced = self
            .inner
            .pending
            .borrow_mut()
            .insert(element, Box::new(on_enter));
        if replaced.is_some() {
            log::debug!("visibility: replaced observer for {element:?}");
        }
    }

    pub fn unobserve(&self, element: ElementId) -> bool {
        self.inner.pending.borrow_mut().remove(&element).is_some()
    }

    pub fn is_observing(&self, element: ElementId) -> bool {
        self.inner.pending.borrow().contains_key(&element)
    }

    pub fn observed_count(&self) -> usize {
        self.inner.pending.borrow().len()
    }

    /// Feeds the latest intersection ratio for `element`.
    ///
    /// Returns `true` if this report fired the element's callback.
    pub fn report(&self, element: ElementId, intersection_ratio: f32) -> bool {
        if !(intersection_ratio >= self.inner.threshold && intersection_ratio > 0.0) {
            return false;
        }
        // Release the borrow before running user code, which may observe again.
        let callback = self.inner.pending.borrow_mut().remove(&element);
        match callback {
            Some(callback) => {
                log::trace!("visibility: {element:?} entered at ratio {intersection_ratio}");
                callback(element);
                true
            }
            None => false,
        }
    }
}

impl Default for VisibilityObserver {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBILITY_THRESHOLD)
    }
}

#[cfg(test)]
#[path = "tests/visibility_tests.rs"]
mod tests;
