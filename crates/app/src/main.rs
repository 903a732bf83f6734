//! Demo binary: a scripted catalog-browsing session over the in-memory
//! catalog.

use std::rc::Rc;

use anyhow::Result;

use carhub_app::CatalogApp;
use carhub_core::{CarRecord, Money, RecordId};
use carhub_panels::DEBOUNCE_QUIET;
use carhub_services::{InMemoryCatalog, TracingNavigator, TracingSink};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    carhub_observability::init_pretty();

    let catalog = InMemoryCatalog::new(seed_cars());
    let mut app = CatalogApp::new(
        catalog.clone(),
        catalog.clone(),
        catalog,
        Rc::new(TracingSink),
        Rc::new(TracingNavigator),
    );

    app.start().await;
    tracing::info!(cars = app.list.cars().len(), "initial catalog loaded");

    // Type a search, let the quiet period elapse, then pump the deadline.
    for text in ["t", "te", "tes", "tesl", "tesla"] {
        app.on_search_input(text);
    }
    tokio::time::sleep(DEBOUNCE_QUIET + std::time::Duration::from_millis(100)).await;
    app.pump().await;
    tracing::info!(
        cars = app.list.cars().len(),
        search = %app.list.filters().search_text,
        "list refetched after debounce"
    );

    // Narrow by category, immediately.
    app.on_categories_changed(vec!["SUV".to_string()]).await;
    tracing::info!(cars = app.list.cars().len(), "narrowed to SUVs");

    // Click the first entry: detail card and similar panel populate.
    if let Some(first) = app.list.cars().first().map(|car| car.id) {
        app.on_car_clicked(first).await;
        if let Some(car) = app.detail.car() {
            tracing::info!(
                name = %car.name,
                price = %carhub_core::price_label(car.msrp),
                similar = app.similar.cars().len(),
                "detail card populated"
            );
        }
        app.detail.navigate_to_record();
    }

    app.stop();
    Ok(())
}

fn seed_cars() -> Vec<CarRecord> {
    fn car(
        name: &str,
        brand: &str,
        category: &str,
        msrp_dollars: u64,
        seats: u8,
        description: &str,
    ) -> CarRecord {
        CarRecord {
            id: RecordId::new(),
            name: name.to_string(),
            brand: brand.to_string(),
            category: category.to_string(),
            msrp: Some(Money::from_dollars(msrp_dollars)),
            control: Some("Automatic".to_string()),
            description: Some(description.to_string()),
            number_of_seats: Some(seats),
            picture_url: None,
        }
    }

    vec![
        car("Model S", "Tesla", "Sedan", 84_990, 5, "Flagship electric sedan"),
        car("Model 3", "Tesla", "Sedan", 42_490, 5, "Compact electric sedan"),
        car("Model Y", "Tesla", "SUV", 49_990, 7, "Mid-size electric SUV"),
        car("Model X", "Tesla", "SUV", 94_990, 7, "Full-size electric SUV"),
        car("Mustang Mach-E", "Ford", "SUV", 42_995, 5, "Electric crossover"),
        car("F-150 Lightning", "Ford", "Truck", 54_995, 5, "Electric pickup"),
        car("R1T", "Rivian", "Truck", 69_900, 5, "Adventure electric truck"),
        car("R1S", "Rivian", "SUV", 75_900, 7, "Adventure electric SUV"),
    ]
}
