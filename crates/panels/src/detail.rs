//! Detail panel: full record data for the most recent selection.

use std::cell::RefCell;
use std::rc::Rc;

use carhub_core::{CarRecord, RecordId};
use carhub_messaging::{Message, MessageBus, SubscriptionHandle, Topic};
use carhub_services::{
    CAR_DETAIL_FIELDS, CAR_OBJECT, FieldSelection, NavigationTarget, Navigator, Notice,
    NotificationSink, ServiceResult,
};

use crate::phase::Phase;

/// Fetch-by-id request recorded by the panel for the driver to execute.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DetailFetch {
    /// Trigger key: the selection this request belongs to.
    pub record_id: RecordId,
    pub fields: FieldSelection,
}

struct DetailState {
    notifier: Rc<dyn NotificationSink>,
    record_id: Option<RecordId>,
    phase: Phase,
    car: Option<CarRecord>,
    pending: Option<DetailFetch>,
    stopped: bool,
}

impl DetailState {
    fn on_record_selected(&mut self, record_id: RecordId) {
        if self.stopped {
            return;
        }
        tracing::debug!(%record_id, "detail selection changed");
        self.record_id = Some(record_id);
        self.phase = Phase::Loading;
        self.pending = Some(DetailFetch {
            record_id,
            fields: CAR_DETAIL_FIELDS,
        });
    }

    fn apply_record(&mut self, record_id: RecordId, outcome: ServiceResult<CarRecord>) {
        if self.stopped || self.record_id != Some(record_id) {
            tracing::debug!(%record_id, "discarding stale detail fetch result");
            return;
        }
        match outcome {
            Ok(car) => {
                self.car = Some(car);
                self.phase = Phase::Populated;
            }
            Err(err) => {
                self.car = None;
                self.phase = Phase::Errored;
                tracing::warn!(%err, "car detail fetch failed");
                self.notifier.show(Notice::error(
                    "Error",
                    "Failed to load car details. Check permissions or record ID.",
                ));
            }
        }
    }
}

/// Shows full details for the most recently selected record.
///
/// Idle until the first selection arrives; re-enters `Loading` on every
/// selection after that.
pub struct DetailPanel {
    bus: Rc<MessageBus>,
    navigator: Rc<dyn Navigator>,
    inner: Rc<RefCell<DetailState>>,
    subscription: Option<SubscriptionHandle>,
}

impl DetailPanel {
    pub fn new(
        bus: Rc<MessageBus>,
        notifier: Rc<dyn NotificationSink>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        let inner = Rc::new(RefCell::new(DetailState {
            notifier,
            record_id: None,
            phase: Phase::Idle,
            car: None,
            pending: None,
            stopped: false,
        }));
        Self {
            bus,
            navigator,
            inner,
            subscription: None,
        }
    }

    /// Subscribe to selection publications. Idempotent.
    pub fn start(&mut self) {
        if self.subscription.is_some() {
            return;
        }
        self.inner.borrow_mut().stopped = false;
        let inner = Rc::clone(&self.inner);
        self.subscription = Some(self.bus.subscribe(Topic::RecordSelected, move |message| {
            if let Message::RecordSelected(event) = message {
                inner.borrow_mut().on_record_selected(event.record_id);
            }
        }));
    }

    /// Unsubscribe and freeze state; no mutation happens after this.
    pub fn stop(&mut self) {
        if let Some(handle) = self.subscription.take() {
            self.bus.unsubscribe(handle);
        }
        let mut state = self.inner.borrow_mut();
        state.stopped = true;
        state.pending = None;
    }

    /// Take the fetch request recorded by the latest selection, if any.
    pub fn take_pending_fetch(&self) -> Option<DetailFetch> {
        self.inner.borrow_mut().pending.take()
    }

    /// Apply a fetch outcome for the given selection. Outcomes for records
    /// that are no longer selected (or after `stop()`) are discarded.
    pub fn apply_record(&self, record_id: RecordId, outcome: ServiceResult<CarRecord>) {
        self.inner.borrow_mut().apply_record(record_id, outcome);
    }

    /// Navigate to the record page for the current selection. No-op when
    /// nothing is selected.
    pub fn navigate_to_record(&self) {
        if let Some(record_id) = self.inner.borrow().record_id {
            self.navigator.navigate_to_record(NavigationTarget {
                record_id,
                object: CAR_OBJECT,
            });
        }
    }

    pub fn phase(&self) -> Phase {
        self.inner.borrow().phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase().is_loading()
    }

    pub fn record_id(&self) -> Option<RecordId> {
        self.inner.borrow().record_id
    }

    pub fn car(&self) -> Option<CarRecord> {
        self.inner.borrow().car.clone()
    }
}
