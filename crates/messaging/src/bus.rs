//! In-process publish/subscribe bus.
//!
//! ## Contract
//!
//! - Topics exist implicitly on first subscribe or publish.
//! - `publish` delivers synchronously to every current subscriber of the
//!   message's topic, in subscription order.
//! - No replay: a subscriber registered after a publish never receives that
//!   past message.
//! - `unsubscribe` is idempotent; unknown or already-removed handles are a
//!   no-op.
//!
//! ## Threading & re-entrancy
//!
//! The bus is single-threaded (`Rc`/`RefCell` interior); publish, subscribe,
//! and unsubscribe are atomic with respect to each other. Delivery snapshots
//! the handler list first, so a handler may subscribe or unsubscribe
//! re-entrantly; a handler removed mid-delivery still receives the in-flight
//! message. A handler must not publish to a topic it is itself subscribed to.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::message::{Message, Topic};

type Handler = Rc<RefCell<dyn FnMut(&Message)>>;

/// Opaque subscription token returned by [`MessageBus::subscribe`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    topic: Topic,
    id: u64,
}

#[derive(Default)]
struct BusInner {
    next_id: u64,
    topics: HashMap<Topic, Vec<(u64, Handler)>>,
}

/// In-process topic bus; the only shared resource between panels.
///
/// Construct one instance explicitly and hand each panel an `Rc` to it.
#[derive(Default)]
pub struct MessageBus {
    inner: RefCell<BusInner>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `topic`.
    ///
    /// Handlers fire in subscription order. The returned handle is the only
    /// way to remove the handler again.
    pub fn subscribe(
        &self,
        topic: Topic,
        handler: impl FnMut(&Message) + 'static,
    ) -> SubscriptionHandle {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner
            .topics
            .entry(topic)
            .or_default()
            .push((id, Rc::new(RefCell::new(handler))));
        SubscriptionHandle { topic, id }
    }

    /// Remove the handler behind `handle`.
    ///
    /// Calling this twice, or with a handle that was never issued, is a no-op.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) {
        let mut inner = self.inner.borrow_mut();
        if let Some(subscribers) = inner.topics.get_mut(&handle.topic) {
            subscribers.retain(|(id, _)| *id != handle.id);
        }
    }

    /// Deliver `message` to every current subscriber of its topic.
    pub fn publish(&self, message: Message) {
        let topic = message.topic();
        let handlers: Vec<Handler> = {
            let inner = self.inner.borrow();
            inner
                .topics
                .get(&topic)
                .map(|subscribers| subscribers.iter().map(|(_, h)| Rc::clone(h)).collect())
                .unwrap_or_default()
        };
        tracing::debug!(
            topic = topic.as_str(),
            subscribers = handlers.len(),
            "publishing"
        );
        for handler in handlers {
            (&mut *handler.borrow_mut())(&message);
        }
    }

    /// Number of live subscribers on `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.inner
            .borrow()
            .topics
            .get(&topic)
            .map_or(0, Vec::len)
    }
}

impl core::fmt::Debug for MessageBus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let inner = self.inner.borrow();
        let mut s = f.debug_struct("MessageBus");
        for topic in [Topic::FiltersChanged, Topic::RecordSelected] {
            s.field(topic.as_str(), &inner.topics.get(&topic).map_or(0, Vec::len));
        }
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carhub_core::{FilterState, RecordId};
    use crate::message::SelectionEvent;

    fn filters_message(search: &str) -> Message {
        let mut state = FilterState::default();
        state.set_search_text(search);
        Message::FiltersChanged(state)
    }

    fn record_log() -> Rc<RefCell<Vec<String>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn logging_handler(log: &Rc<RefCell<Vec<String>>>, tag: &str) -> impl FnMut(&Message) + 'static {
        let log = Rc::clone(log);
        let tag = tag.to_string();
        move |message| log.borrow_mut().push(format!("{tag}:{}", message.topic().as_str()))
    }

    #[test]
    fn delivers_in_subscription_order() {
        let bus = MessageBus::new();
        let log = record_log();
        bus.subscribe(Topic::FiltersChanged, logging_handler(&log, "first"));
        bus.subscribe(Topic::FiltersChanged, logging_handler(&log, "second"));

        bus.publish(filters_message("tesla"));

        assert_eq!(
            log.borrow().as_slice(),
            ["first:filters-changed", "second:filters-changed"]
        );
    }

    #[test]
    fn topics_are_isolated() {
        let bus = MessageBus::new();
        let log = record_log();
        bus.subscribe(Topic::FiltersChanged, logging_handler(&log, "filters"));
        bus.subscribe(Topic::RecordSelected, logging_handler(&log, "selected"));

        bus.publish(Message::RecordSelected(SelectionEvent {
            record_id: RecordId::new(),
        }));

        assert_eq!(log.borrow().as_slice(), ["selected:record-selected"]);
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let bus = MessageBus::new();
        bus.publish(filters_message(""));
        assert_eq!(bus.subscriber_count(Topic::FiltersChanged), 0);
    }

    #[test]
    fn late_subscriber_sees_no_replay() {
        let bus = MessageBus::new();
        bus.publish(filters_message("before"));

        let log = record_log();
        bus.subscribe(Topic::FiltersChanged, logging_handler(&log, "late"));
        assert!(log.borrow().is_empty());

        bus.publish(filters_message("after"));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let bus = MessageBus::new();
        let log = record_log();
        let handle = bus.subscribe(Topic::FiltersChanged, logging_handler(&log, "a"));
        bus.subscribe(Topic::FiltersChanged, logging_handler(&log, "b"));

        bus.unsubscribe(handle);
        bus.unsubscribe(handle);

        bus.publish(filters_message("x"));
        assert_eq!(log.borrow().as_slice(), ["b:filters-changed"]);
        assert_eq!(bus.subscriber_count(Topic::FiltersChanged), 1);
    }

    #[test]
    fn handler_may_unsubscribe_itself_during_delivery() {
        let bus = Rc::new(MessageBus::new());
        let log = record_log();

        let handle_cell: Rc<RefCell<Option<SubscriptionHandle>>> = Rc::new(RefCell::new(None));
        let handle = {
            let bus_in_handler = Rc::clone(&bus);
            let log = Rc::clone(&log);
            let handle_cell = Rc::clone(&handle_cell);
            bus.subscribe(Topic::FiltersChanged, move |_| {
                log.borrow_mut().push("fired".to_string());
                if let Some(handle) = handle_cell.borrow_mut().take() {
                    bus_in_handler.unsubscribe(handle);
                }
            })
        };
        *handle_cell.borrow_mut() = Some(handle);

        bus.publish(filters_message("one"));
        bus.publish(filters_message("two"));

        // Fired once, then removed itself.
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(bus.subscriber_count(Topic::FiltersChanged), 0);
    }

    #[test]
    fn subscriber_added_during_delivery_misses_the_in_flight_message() {
        let bus = Rc::new(MessageBus::new());
        let log = record_log();

        {
            let bus_for_handler = Rc::clone(&bus);
            let log_for_new = Rc::clone(&log);
            bus.subscribe(Topic::FiltersChanged, move |_| {
                let log = Rc::clone(&log_for_new);
                bus_for_handler.subscribe(Topic::FiltersChanged, move |_| {
                    log.borrow_mut().push("added".to_string());
                });
            });
        }

        bus.publish(filters_message("first"));
        assert!(log.borrow().is_empty());

        bus.publish(filters_message("second"));
        assert_eq!(log.borrow().len(), 1);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Every subscriber sees every publication on its topic, in
            /// publish order.
            #[test]
            fn all_publications_arrive_in_order(searches in proptest::collection::vec("[a-z]{0,8}", 0..20)) {
                let bus = MessageBus::new();
                let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
                {
                    let seen = Rc::clone(&seen);
                    bus.subscribe(Topic::FiltersChanged, move |message| {
                        if let Message::FiltersChanged(state) = message {
                            seen.borrow_mut().push(state.search_text.clone());
                        }
                    });
                }

                for search in &searches {
                    bus.publish(filters_message(search));
                }

                let seen_ref = seen.borrow();
                prop_assert_eq!(seen_ref.as_slice(), searches.as_slice());
            }
        }
    }
}
