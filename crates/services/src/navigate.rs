//! UI navigation collaborator.

use std::cell::RefCell;

use carhub_core::RecordId;

/// Where a navigation request points.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    pub record_id: RecordId,
    pub object: &'static str,
}

/// Fire-and-forget navigation to a record page.
pub trait Navigator {
    fn navigate_to_record(&self, target: NavigationTarget);
}

/// Navigator that only logs the request (demo/headless use).
#[derive(Debug, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate_to_record(&self, target: NavigationTarget) {
        tracing::info!(record_id = %target.record_id, object = target.object, "navigate to record");
    }
}

/// Navigator that records targets for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    targets: RefCell<Vec<NavigationTarget>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn targets(&self) -> Vec<NavigationTarget> {
        self.targets.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to_record(&self, target: NavigationTarget) {
        self.targets.borrow_mut().push(target);
    }
}
