//! Filter panel: debounced filter publication plus picklist options.

use std::rc::Rc;
use std::time::{Duration, Instant};

use carhub_core::{FilterState, Money};
use carhub_messaging::{Message, MessageBus};
use carhub_services::{Notice, NotificationSink, PicklistEntry, PicklistField, ServiceResult};

/// Quiet period after the last text/price edit before a snapshot publishes.
pub const DEBOUNCE_QUIET: Duration = Duration::from_millis(500);

/// Collects user filter input and publishes normalized snapshots.
///
/// Text and price edits update local state immediately but publish on a
/// debounced deadline, collapsing bursts into one publication carrying the
/// final state. Multi-select changes publish immediately: a selection is a
/// discrete, deliberate action, not a keystroke stream.
///
/// The panel owns its state exclusively; subscribers only ever see published
/// copies.
pub struct FilterPanel {
    bus: Rc<MessageBus>,
    notifier: Rc<dyn NotificationSink>,
    state: FilterState,
    categories: Vec<PicklistEntry>,
    brands: Vec<PicklistEntry>,
    deadline: Option<Instant>,
    started: bool,
}

impl FilterPanel {
    pub fn new(bus: Rc<MessageBus>, notifier: Rc<dyn NotificationSink>) -> Self {
        Self {
            bus,
            notifier,
            state: FilterState::default(),
            categories: Vec::new(),
            brands: Vec::new(),
            deadline: None,
            started: false,
        }
    }

    /// Publish the mount-time default snapshot.
    ///
    /// Call after the downstream panels have subscribed, so the initial
    /// publication populates the list before any user interaction.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.publish_now();
    }

    /// Cancel any armed deadline and freeze the panel. No publication fires
    /// after this.
    pub fn stop(&mut self) {
        self.deadline = None;
        self.started = false;
    }

    /// Record a search-text edit; publication is debounced.
    pub fn on_search_input(&mut self, text: &str, now: Instant) {
        self.state.set_search_text(text);
        self.arm(now);
    }

    /// Record a price-bound edit; publication is debounced. The legacy
    /// unbounded sentinel normalizes to `None` here, at the state boundary.
    pub fn on_price_input(&mut self, price: Option<Money>, now: Instant) {
        self.state.set_max_price(price);
        self.arm(now);
    }

    /// Replace the category selection and publish immediately. An armed
    /// text/price deadline is left untouched.
    pub fn on_categories_changed(&mut self, values: Vec<String>) {
        self.state.set_selected_categories(values);
        self.publish_now();
    }

    /// Replace the brand selection and publish immediately.
    pub fn on_brands_changed(&mut self, values: Vec<String>) {
        self.state.set_selected_brands(values);
        self.publish_now();
    }

    /// Fire the armed deadline if the quiet period has elapsed.
    ///
    /// Returns whether a publication fired. Intermediate states from the
    /// burst are dropped; only the state at expiry publishes.
    pub fn poll_debounce(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.publish_now();
                true
            }
            _ => false,
        }
    }

    /// Armed publication deadline, for driver scheduling.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Apply a picklist load outcome.
    ///
    /// Failure leaves the option set empty and surfaces one notification;
    /// filter input keeps working either way.
    pub fn apply_picklist(
        &mut self,
        field: PicklistField,
        outcome: ServiceResult<Vec<PicklistEntry>>,
    ) {
        let options = match field {
            PicklistField::Category => &mut self.categories,
            PicklistField::Brand => &mut self.brands,
        };
        match outcome {
            Ok(entries) => *options = entries,
            Err(err) => {
                options.clear();
                tracing::warn!(field = field.as_str(), %err, "picklist load failed");
                let message = match field {
                    PicklistField::Category => "Failed to load category picklist values",
                    PicklistField::Brand => "Failed to load brand picklist values",
                };
                self.notifier.show(Notice::error("Error", message));
            }
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.state
    }

    pub fn categories(&self) -> &[PicklistEntry] {
        &self.categories
    }

    pub fn brands(&self) -> &[PicklistEntry] {
        &self.brands
    }

    fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + DEBOUNCE_QUIET);
    }

    fn publish_now(&mut self) {
        if !self.started {
            return;
        }
        tracing::debug!(filters = ?self.state, "publishing filter snapshot");
        self.bus.publish(Message::FiltersChanged(self.state.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use carhub_messaging::Topic;
    use carhub_services::{CollectingSink, ServiceError};

    fn published_snapshots(bus: &Rc<MessageBus>) -> Rc<RefCell<Vec<FilterState>>> {
        let seen: Rc<RefCell<Vec<FilterState>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bus.subscribe(Topic::FiltersChanged, move |message| {
            if let Message::FiltersChanged(state) = message {
                sink.borrow_mut().push(state.clone());
            }
        });
        seen
    }

    fn panel_with_probe() -> (FilterPanel, Rc<RefCell<Vec<FilterState>>>, Rc<CollectingSink>) {
        let bus = Rc::new(MessageBus::new());
        let seen = published_snapshots(&bus);
        let sink = Rc::new(CollectingSink::new());
        let panel = FilterPanel::new(bus, Rc::clone(&sink) as Rc<dyn NotificationSink>);
        (panel, seen, sink)
    }

    #[test]
    fn start_publishes_the_default_snapshot_once() {
        let (mut panel, seen, _) = panel_with_probe();
        panel.start();
        panel.start();

        let snapshots = seen.borrow();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0], FilterState::default());
        assert!(snapshots[0].is_unfiltered());
    }

    #[test]
    fn rapid_edits_collapse_into_one_publication_of_the_final_state() {
        let (mut panel, seen, _) = panel_with_probe();
        panel.start();
        let t0 = Instant::now();

        for (offset_ms, text) in [(0, "t"), (80, "te"), (160, "tes"), (240, "tesl"), (300, "tesla")]
        {
            panel.on_search_input(text, t0 + Duration::from_millis(offset_ms));
        }

        // Still inside the quiet period of the last edit: nothing fires.
        assert!(!panel.poll_debounce(t0 + Duration::from_millis(700)));
        // 600ms after the last edit: exactly one publication, final state.
        assert!(panel.poll_debounce(t0 + Duration::from_millis(900)));

        let snapshots = seen.borrow();
        assert_eq!(snapshots.len(), 2); // mount publish + debounced publish
        assert_eq!(snapshots[1].search_text, "tesla");

        drop(snapshots);
        // The deadline cleared; polling again publishes nothing.
        assert!(!panel.poll_debounce(t0 + Duration::from_millis(2000)));
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn price_edits_are_debounced_and_normalized() {
        let (mut panel, seen, _) = panel_with_probe();
        panel.start();
        let t0 = Instant::now();

        panel.on_price_input(Some(Money::UNBOUNDED_SENTINEL), t0);
        assert!(panel.poll_debounce(t0 + DEBOUNCE_QUIET));

        let snapshots = seen.borrow();
        assert_eq!(snapshots[1].max_price, None);
    }

    #[test]
    fn selection_changes_publish_immediately() {
        let (mut panel, seen, _) = panel_with_probe();
        panel.start();

        panel.on_categories_changed(vec!["SUV".to_string()]);
        panel.on_brands_changed(vec!["Tesla".to_string()]);

        let snapshots = seen.borrow();
        assert_eq!(snapshots.len(), 3);
        assert!(snapshots[1].selected_categories.contains("SUV"));
        assert!(snapshots[2].selected_brands.contains("Tesla"));
    }

    #[test]
    fn selection_publish_leaves_the_armed_deadline_in_place() {
        let (mut panel, seen, _) = panel_with_probe();
        panel.start();
        let t0 = Instant::now();

        panel.on_search_input("tes", t0);
        panel.on_categories_changed(vec!["SUV".to_string()]);

        // Immediate publication happened, deadline still armed.
        assert_eq!(seen.borrow().len(), 2);
        assert!(panel.deadline().is_some());

        // The deadline later fires with the full final state.
        assert!(panel.poll_debounce(t0 + DEBOUNCE_QUIET));
        let snapshots = seen.borrow();
        assert_eq!(snapshots.len(), 3);
        assert_eq!(snapshots[2].search_text, "tes");
        assert!(snapshots[2].selected_categories.contains("SUV"));
    }

    #[test]
    fn stop_cancels_the_pending_publication() {
        let (mut panel, seen, _) = panel_with_probe();
        panel.start();
        let t0 = Instant::now();

        panel.on_search_input("tesla", t0);
        panel.stop();

        assert!(panel.deadline().is_none());
        assert!(!panel.poll_debounce(t0 + Duration::from_secs(5)));
        assert_eq!(seen.borrow().len(), 1); // only the mount publish
    }

    #[test]
    fn picklist_failure_empties_options_and_notifies_once() {
        let (mut panel, _, sink) = panel_with_probe();
        panel.apply_picklist(
            PicklistField::Category,
            Ok(vec![PicklistEntry::plain("SUV")]),
        );
        assert_eq!(panel.categories().len(), 1);

        panel.apply_picklist(
            PicklistField::Category,
            Err(ServiceError::metadata("picklist unavailable")),
        );
        assert!(panel.categories().is_empty());

        let notices = sink.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "Failed to load category picklist values");

        // Input still works after the failure.
        panel.start();
        panel.on_brands_changed(vec!["Ford".to_string()]);
        assert!(panel.filters().selected_brands.contains("Ford"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Any burst of edits inside one quiet window publishes exactly
            /// once, carrying the state after the last edit.
            #[test]
            fn bursts_collapse_to_one_publication(
                edits in proptest::collection::vec(("[a-z]{0,6}", 0u64..400), 1..12)
            ) {
                let (mut panel, seen, _) = panel_with_probe();
                panel.start();
                let t0 = Instant::now();

                let mut last_text = String::new();
                let mut last_at = 0u64;
                for (text, offset) in &edits {
                    // Offsets under 400ms keep every edit inside the
                    // previous edit's quiet window.
                    last_at += offset;
                    panel.on_search_input(text, t0 + Duration::from_millis(last_at));
                    last_text = text.clone();
                }

                let fired = panel.poll_debounce(
                    t0 + Duration::from_millis(last_at) + DEBOUNCE_QUIET,
                );
                prop_assert!(fired);

                let snapshots = seen.borrow();
                prop_assert_eq!(snapshots.len(), 2);
                prop_assert_eq!(&snapshots[1].search_text, &last_text);
            }
        }
    }
}
