//! Catalog store wiring.
//!
//! This module wraps a JSON catalog file (by default `data/catalog.json`) so
//! the query engine can work from a validated, immutable snapshot. Types here
//! mirror the schema fields; callers use [`CatalogStore`] for loading and
//! slug/id lookups and the model structs when raw collections suffice.

pub mod identity;
pub mod model;
pub mod store;

pub use identity::{EntityId, Slug};
pub use model::{
    CatalogData, Category, Color, Format, Image, Manufacturer, Material, Product, SortOption,
};
pub use store::CatalogStore;

pub use model::load_catalog_from_path;
