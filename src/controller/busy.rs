use super::surface::Surface;
use std::cell::{Cell, RefCell};

/// Count of outstanding requests behind the busy indicator
#[derive(Debug, Default)]
pub struct BusyIndicator {
    depth: Cell<usize>,
}

impl BusyIndicator {
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    /// Show the indicator until the returned guard is dropped
    pub fn acquire<'a, U: Surface>(&'a self, surface: &'a RefCell<U>) -> BusyGuard<'a, U> {
        let depth = self.depth.get();
        self.depth.set(depth + 1);
        if depth == 0 {
            surface.borrow_mut().set_busy(true);
        }
        BusyGuard {
            indicator: self,
            surface,
        }
    }
}

/// Hides the indicator on drop once no other request holds it
pub struct BusyGuard<'a, U: Surface> {
    indicator: &'a BusyIndicator,
    surface: &'a RefCell<U>,
}

impl<U: Surface> Drop for BusyGuard<'_, U> {
    fn drop(&mut self) {
        let depth = self.indicator.depth.get().saturating_sub(1);
        self.indicator.depth.set(depth);
        if depth == 0 {
            self.surface.borrow_mut().set_busy(false);
        }
    }
}
