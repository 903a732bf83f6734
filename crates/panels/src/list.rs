//! List panel: keeps the rendered record set consistent with the most
//! recently published filter snapshot.

use std::cell::RefCell;
use std::rc::Rc;

use carhub_core::{CarRecord, CarSummary, FilterState, RecordId};
use carhub_messaging::{Message, MessageBus, SelectionEvent, SubscriptionHandle, Topic};
use carhub_services::{Notice, NotificationSink, ServiceResult};

use crate::phase::Phase;

/// Fetch request recorded by the panel for the driver to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFetch {
    /// Trigger key: identifies the publication that issued this request.
    pub generation: u64,
    pub filters: FilterState,
}

struct ListState {
    notifier: Rc<dyn NotificationSink>,
    filters: FilterState,
    phase: Phase,
    cars: Vec<CarSummary>,
    no_results: bool,
    generation: u64,
    pending: Option<ListFetch>,
    stopped: bool,
}

impl ListState {
    fn on_filters_changed(&mut self, filters: FilterState) {
        if self.stopped {
            return;
        }
        tracing::debug!(?filters, "list filters replaced");
        self.filters = filters.clone();
        self.phase = Phase::Loading;
        self.generation += 1;
        // A request superseded before it ran is dropped outright; only the
        // latest publication's fetch ever executes.
        self.pending = Some(ListFetch {
            generation: self.generation,
            filters,
        });
    }

    fn apply_records(&mut self, generation: u64, outcome: ServiceResult<Vec<CarRecord>>) {
        if self.stopped || generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "discarding stale list fetch result"
            );
            return;
        }
        match outcome {
            Ok(records) => {
                self.no_results = records.is_empty();
                self.cars = records.iter().map(CarSummary::from_record).collect();
                self.phase = if self.no_results {
                    Phase::Empty
                } else {
                    Phase::Populated
                };
            }
            Err(err) => {
                self.cars.clear();
                self.no_results = true;
                self.phase = Phase::Errored;
                tracing::warn!(%err, "car list fetch failed");
                self.notifier.show(Notice::error("Error", "Failed to load cars"));
            }
        }
    }
}

/// Renders the filtered record set; publishes a selection on click.
///
/// The loading phase clears on every terminal outcome, success or failure.
/// An empty result is a distinct `no_results` state, not merely an empty
/// list, so the view can tell "nothing matched" from "still loading".
pub struct ListPanel {
    bus: Rc<MessageBus>,
    inner: Rc<RefCell<ListState>>,
    subscription: Option<SubscriptionHandle>,
}

impl ListPanel {
    pub fn new(bus: Rc<MessageBus>, notifier: Rc<dyn NotificationSink>) -> Self {
        let inner = Rc::new(RefCell::new(ListState {
            notifier,
            filters: FilterState::default(),
            // The mount-time default publication is already on its way.
            phase: Phase::Loading,
            cars: Vec::new(),
            no_results: false,
            generation: 0,
            pending: None,
            stopped: false,
        }));
        Self {
            bus,
            inner,
            subscription: None,
        }
    }

    /// Subscribe to filter publications. Idempotent.
    pub fn start(&mut self) {
        if self.subscription.is_some() {
            return;
        }
        self.inner.borrow_mut().stopped = false;
        let inner = Rc::clone(&self.inner);
        self.subscription = Some(self.bus.subscribe(Topic::FiltersChanged, move |message| {
            if let Message::FiltersChanged(filters) = message {
                inner.borrow_mut().on_filters_changed(filters.clone());
            }
        }));
    }

    /// Unsubscribe and freeze state; fetch outcomes arriving later are
    /// discarded.
    pub fn stop(&mut self) {
        if let Some(handle) = self.subscription.take() {
            self.bus.unsubscribe(handle);
        }
        let mut state = self.inner.borrow_mut();
        state.stopped = true;
        state.pending = None;
    }

    /// Take the fetch request recorded by the latest publication, if any.
    pub fn take_pending_fetch(&self) -> Option<ListFetch> {
        self.inner.borrow_mut().pending.take()
    }

    /// Apply a fetch outcome for the given trigger key. Superseded keys (and
    /// anything after `stop()`) are discarded.
    pub fn apply_records(&self, generation: u64, outcome: ServiceResult<Vec<CarRecord>>) {
        self.inner.borrow_mut().apply_records(generation, outcome);
    }

    /// Publish the selection for a clicked entry. The panel's own state is
    /// untouched.
    pub fn on_car_clicked(&self, record_id: RecordId) {
        self.bus
            .publish(Message::RecordSelected(SelectionEvent { record_id }));
    }

    pub fn phase(&self) -> Phase {
        self.inner.borrow().phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase().is_loading()
    }

    pub fn no_results(&self) -> bool {
        self.inner.borrow().no_results
    }

    pub fn cars(&self) -> Vec<CarSummary> {
        self.inner.borrow().cars.clone()
    }

    pub fn filters(&self) -> FilterState {
        self.inner.borrow().filters.clone()
    }
}
