//! Catalog application: wires the bus, panels, and collaborators together
//! and drives pending fetches.

use std::rc::Rc;
use std::time::Instant;

use carhub_core::{Money, RecordId};
use carhub_messaging::MessageBus;
use carhub_panels::{DetailPanel, FilterPanel, ListPanel, SimilarFetch, SimilarPanel};
use carhub_services::{
    MetadataStore, Navigator, NotificationSink, PicklistField, RecordStore, SimilarityService,
};

/// Composition root for the catalog-browsing UI.
///
/// The bus is constructed here and handed to each panel by reference;
/// there is no ambient/global message context. Pending fetches run
/// sequentially in issue order, matching the platform's serialized
/// completions; the panels' stale-key guards keep the design correct under
/// concurrent completion reordering as well.
pub struct CatalogApp<R, M, S> {
    bus: Rc<MessageBus>,
    pub filter: FilterPanel,
    pub list: ListPanel,
    pub detail: DetailPanel,
    pub similar: SimilarPanel,
    records: R,
    metadata: M,
    similarity: S,
}

impl<R, M, S> CatalogApp<R, M, S>
where
    R: RecordStore,
    M: MetadataStore,
    S: SimilarityService,
{
    pub fn new(
        records: R,
        metadata: M,
        similarity: S,
        notifier: Rc<dyn NotificationSink>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        let bus = Rc::new(MessageBus::new());
        let filter = FilterPanel::new(Rc::clone(&bus), Rc::clone(&notifier));
        let list = ListPanel::new(Rc::clone(&bus), Rc::clone(&notifier));
        let detail = DetailPanel::new(
            Rc::clone(&bus),
            Rc::clone(&notifier),
            Rc::clone(&navigator),
        );
        let similar = SimilarPanel::new(Rc::clone(&bus), notifier, navigator);
        Self {
            bus,
            filter,
            list,
            detail,
            similar,
            records,
            metadata,
            similarity,
        }
    }

    /// The app's bus, for observing traffic (tests, diagnostics).
    pub fn bus(&self) -> Rc<MessageBus> {
        Rc::clone(&self.bus)
    }

    /// Start all panels and run the initial population cycle.
    ///
    /// Downstream panels subscribe first so the filter panel's mount-time
    /// default publication reaches them.
    pub async fn start(&mut self) {
        self.list.start();
        self.detail.start();
        self.similar.start();

        for field in [PicklistField::Category, PicklistField::Brand] {
            let outcome = self.metadata.fetch_picklist(field).await;
            self.filter.apply_picklist(field, outcome);
        }

        self.filter.start();
        self.drain_fetches().await;
        tracing::info!("catalog app started");
    }

    /// Stop panels in reverse start order.
    pub fn stop(&mut self) {
        self.filter.stop();
        self.similar.stop();
        self.detail.stop();
        self.list.stop();
        tracing::info!("catalog app stopped");
    }

    /// Forward a search-text edit (debounced; see [`Self::pump`]).
    pub fn on_search_input(&mut self, text: &str) {
        self.filter.on_search_input(text, Instant::now());
    }

    /// Forward a price-bound edit (debounced; see [`Self::pump`]).
    pub fn on_price_input(&mut self, price: Option<Money>) {
        self.filter.on_price_input(price, Instant::now());
    }

    /// Forward a category multi-select change and run the resulting fetch.
    pub async fn on_categories_changed(&mut self, values: Vec<String>) {
        self.filter.on_categories_changed(values);
        self.drain_fetches().await;
    }

    /// Forward a brand multi-select change and run the resulting fetch.
    pub async fn on_brands_changed(&mut self, values: Vec<String>) {
        self.filter.on_brands_changed(values);
        self.drain_fetches().await;
    }

    /// Forward a list-entry click and run the resulting detail/similar
    /// fetches.
    pub async fn on_car_clicked(&mut self, record_id: RecordId) {
        self.list.on_car_clicked(record_id);
        self.drain_fetches().await;
    }

    /// Fire a due debounce deadline and drain pending fetches.
    pub async fn pump(&mut self) {
        self.filter.poll_debounce(Instant::now());
        self.drain_fetches().await;
    }

    /// Armed debounce deadline, for driver scheduling.
    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.filter.deadline()
    }

    /// Execute pending fetches until no panel has one left.
    ///
    /// A drained fetch may queue a follow-up (brand lookup → similarity
    /// fetch), hence the loop.
    async fn drain_fetches(&mut self) {
        loop {
            let mut progressed = false;

            if let Some(fetch) = self.list.take_pending_fetch() {
                let outcome = self.records.fetch_by_filter(&fetch.filters).await;
                self.list.apply_records(fetch.generation, outcome);
                progressed = true;
            }

            if let Some(fetch) = self.detail.take_pending_fetch() {
                let outcome = self.records.fetch_by_id(fetch.record_id, &fetch.fields).await;
                self.detail.apply_record(fetch.record_id, outcome);
                progressed = true;
            }

            if let Some(fetch) = self.similar.take_pending_fetch() {
                match fetch {
                    SimilarFetch::BrandLookup { record_id, fields } => {
                        let outcome = self.records.fetch_by_id(record_id, &fields).await;
                        self.similar.apply_brand(record_id, outcome);
                    }
                    SimilarFetch::Similar { record_id, brand } => {
                        let outcome = self.similarity.fetch_similar(record_id, &brand).await;
                        self.similar.apply_similar(record_id, outcome);
                    }
                }
                progressed = true;
            }

            if !progressed {
                break;
            }
        }
    }
}
