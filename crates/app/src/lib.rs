//! `carhub-app` — composition root and fetch driver.

pub mod catalog_app;

pub use catalog_app::CatalogApp;
