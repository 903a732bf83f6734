//! Similar-vehicles panel: same-brand records for the most recent selection.

use std::cell::RefCell;
use std::rc::Rc;

use carhub_core::{CarRecord, CarSummary, RecordId};
use carhub_messaging::{Message, MessageBus, SubscriptionHandle, Topic};
use carhub_services::{
    CAR_BRAND_FIELD, CAR_OBJECT, FieldSelection, NavigationTarget, Navigator, Notice,
    NotificationSink, ServiceResult,
};

use crate::phase::Phase;

/// Two-step pending fetch: resolve the brand first, then the similarity call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimilarFetch {
    /// Look up the selected record's brand (brand-only field selection).
    BrandLookup {
        record_id: RecordId,
        fields: FieldSelection,
    },
    /// Fetch same-brand records.
    Similar { record_id: RecordId, brand: String },
}

struct SimilarState {
    notifier: Rc<dyn NotificationSink>,
    record_id: Option<RecordId>,
    phase: Phase,
    cars: Vec<CarSummary>,
    pending: Option<SimilarFetch>,
    stopped: bool,
}

impl SimilarState {
    fn on_record_selected(&mut self, record_id: RecordId) {
        if self.stopped {
            return;
        }
        self.record_id = Some(record_id);
        self.phase = Phase::Loading;
        self.pending = Some(SimilarFetch::BrandLookup {
            record_id,
            fields: CAR_BRAND_FIELD,
        });
    }

    fn apply_brand(&mut self, record_id: RecordId, outcome: ServiceResult<CarRecord>) {
        if self.stopped || self.record_id != Some(record_id) {
            tracing::debug!(%record_id, "discarding stale brand lookup result");
            return;
        }
        match outcome {
            Ok(car) if !car.brand.is_empty() => {
                self.pending = Some(SimilarFetch::Similar {
                    record_id,
                    brand: car.brand,
                });
            }
            Ok(_) => {
                // No brand to match on.
                self.cars.clear();
                self.phase = Phase::Empty;
            }
            Err(err) => {
                self.cars.clear();
                self.phase = Phase::Errored;
                tracing::warn!(%err, "brand lookup failed");
                self.notifier
                    .show(Notice::error("Error", "Failed to load car brand"));
            }
        }
    }

    fn apply_similar(&mut self, record_id: RecordId, outcome: ServiceResult<Vec<CarRecord>>) {
        if self.stopped || self.record_id != Some(record_id) {
            tracing::debug!(%record_id, "discarding stale similar fetch result");
            return;
        }
        match outcome {
            Ok(records) => {
                self.cars = records.iter().map(CarSummary::from_record).collect();
                self.phase = if self.cars.is_empty() {
                    Phase::Empty
                } else {
                    Phase::Populated
                };
            }
            Err(err) => {
                self.cars.clear();
                self.phase = Phase::Errored;
                tracing::warn!(%err, "similar cars fetch failed");
                self.notifier
                    .show(Notice::error("Error", "Failed to load similar cars"));
            }
        }
    }
}

/// Shows same-brand records for the most recently selected record.
pub struct SimilarPanel {
    bus: Rc<MessageBus>,
    navigator: Rc<dyn Navigator>,
    inner: Rc<RefCell<SimilarState>>,
    subscription: Option<SubscriptionHandle>,
}

impl SimilarPanel {
    pub fn new(
        bus: Rc<MessageBus>,
        notifier: Rc<dyn NotificationSink>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        let inner = Rc::new(RefCell::new(SimilarState {
            notifier,
            record_id: None,
            phase: Phase::Idle,
            cars: Vec::new(),
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

    /// Unsubscribe and freeze state.
    pub fn stop(&mut self) {
        if let Some(handle) = self.subscription.take() {
            self.bus.unsubscribe(handle);
        }
        let mut state = self.inner.borrow_mut();
        state.stopped = true;
        state.pending = None;
    }

    /// Take the next step of the two-step fetch, if one is due.
    pub fn take_pending_fetch(&self) -> Option<SimilarFetch> {
        self.inner.borrow_mut().pending.take()
    }

    /// Apply a brand-lookup outcome. On success this queues the similarity
    /// fetch as the next pending step.
    pub fn apply_brand(&self, record_id: RecordId, outcome: ServiceResult<CarRecord>) {
        self.inner.borrow_mut().apply_brand(record_id, outcome);
    }

    /// Apply a similarity-fetch outcome.
    pub fn apply_similar(&self, record_id: RecordId, outcome: ServiceResult<Vec<CarRecord>>) {
        self.inner.borrow_mut().apply_similar(record_id, outcome);
    }

    /// Navigate to a clicked similar entry.
    pub fn navigate_to_car(&self, record_id: RecordId) {
        self.navigator.navigate_to_record(NavigationTarget {
            record_id,
            object: CAR_OBJECT,
        });
    }

    pub fn phase(&self) -> Phase {
        self.inner.borrow().phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase().is_loading()
    }

    pub fn cars(&self) -> Vec<CarSummary> {
        self.inner.borrow().cars.clone()
    }
}
