//! Deserializable representation of a catalog data file.
//!
//! The types mirror `schema/catalog.schema.json` so the store and tests can
//! reason about catalog entities without ad-hoc JSON handling. Use
//! [`crate::catalog::CatalogStore`] for validated loading and slug/id lookup;
//! use these structs directly when the raw collections are all that is needed.

use crate::catalog::identity::{EntityId, Slug};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Full catalog as stored on disk: five entity collections plus the schema
/// version tag the store checks at load time.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CatalogData {
    pub schema_version: String,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub manufacturers: Vec<Manufacturer>,
    pub formats: Vec<Format>,
    pub sort_options: Vec<SortOption>,
}

/// One sellable catalog entry.
///
/// A product always carries its owning manufacturer inline and at least one
/// small and big image; everything else is optional or may be empty. The
/// `categories` and `formats` lists hold slugs, not embedded entities, and are
/// deliberately not checked against the catalog's category tree or format
/// collection: a slug that matches nothing simply never passes a facet filter.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    pub slug: Slug,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
    pub categories: Vec<Slug>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub has_more_materials: bool,
    #[serde(default)]
    pub has_more_sizes: bool,
    #[serde(default)]
    pub formats: Vec<Slug>,
    #[serde(default)]
    pub is_new: bool,
    pub manufacturer: Manufacturer,
    pub card_image: Image,
    pub small_images: Vec<Image>,
    pub big_images: Vec<Image>,
}

/// Swatch color attached to a product.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Color {
    pub id: EntityId,
    pub name: String,
    pub slug: Slug,
    pub hex_code: String,
}

/// Material attached to a product, with a sample image.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Material {
    pub id: EntityId,
    pub name: String,
    pub slug: Slug,
    pub image: Image,
}

/// Brand owning one or more products.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Manufacturer {
    pub id: EntityId,
    pub logo: Image,
    pub name: String,
    pub slug: Slug,
    #[serde(default)]
    pub location: Option<String>,
}

/// Node in the category tree. Children own their subtrees; the static data
/// source carries no cycles, so no back-pointers are needed.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub slug: Slug,
    #[serde(default)]
    pub child_categories: Vec<Category>,
}

/// Product format facet (shape or footprint), with a pictogram.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Format {
    pub id: EntityId,
    pub name: String,
    pub slug: Slug,
    pub image: Image,
}

/// An available sort key. Carries no comparator; the engine exposes these for
/// callers to present but does not reorder results by them.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SortOption {
    pub id: EntityId,
    pub name: String,
    pub slug: Slug,
}

/// Image reference with required pixel dimensions.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub preload_url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    pub width: u32,
    pub height: u32,
}

/// Read and parse a catalog data file without additional validation.
pub fn load_catalog_from_path(path: &Path) -> Result<CatalogData> {
    let data = fs::read_to_string(path)?;
    let catalog: CatalogData = serde_json::from_str(&data)?;
    Ok(catalog)
}
