//! Validated, indexed view of one loaded catalog.
//!
//! The store enforces the expected catalog schema version and the slug
//! uniqueness invariant, and builds deterministic lookup maps for the entity
//! collections. It is intentionally strict at load time so query callers can
//! treat every lookup as a pure read over well-formed data: after `load`
//! succeeds, nothing mutates the collections for the life of the process.

use crate::catalog::identity::{EntityId, Slug};
use crate::catalog::model::{
    CatalogData, Category, Format, Manufacturer, Product, SortOption, load_catalog_from_path,
};
use crate::schema_loader::load_json_schema;
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Catalog collections plus derived indexes keyed by slug (or manufacturer id).
///
/// Index values are positions into the load-ordered collection vectors, so
/// iteration order always reflects the data file and lookups stay cheap.
#[derive(Debug)]
pub struct CatalogStore {
    data: CatalogData,
    products_by_slug: BTreeMap<Slug, usize>,
    categories_by_slug: BTreeMap<Slug, usize>,
    manufacturers_by_id: BTreeMap<EntityId, usize>,
    formats_by_slug: BTreeMap<Slug, usize>,
}

impl CatalogStore {
    /// Load and validate a catalog from disk.
    ///
    /// Validates the payload against `schema/catalog.schema.json`, checks the
    /// schema version tag, and builds the slug/id indexes. Any failure here is
    /// fatal for startup; there is no partially-loaded store.
    pub fn load(path: &Path) -> Result<Self> {
        let expected_version = validate_against_schema(path)?;

        let data =
            load_catalog_from_path(path).with_context(|| format!("loading {}", path.display()))?;
        validate_schema_version(&data.schema_version, &expected_version)?;

        let products_by_slug = index_by_slug("product", data.products.iter().map(|p| &p.slug))?;
        let categories_by_slug =
            index_by_slug("category", data.categories.iter().map(|c| &c.slug))?;
        let formats_by_slug = index_by_slug("format", data.formats.iter().map(|f| &f.slug))?;
        let manufacturers_by_id = index_manufacturers(&data.manufacturers)?;

        Ok(Self {
            data,
            products_by_slug,
            categories_by_slug,
            manufacturers_by_id,
            formats_by_slug,
        })
    }

    /// The version tag declared in the loaded file.
    pub fn schema_version(&self) -> &str {
        &self.data.schema_version
    }

    /// All products in load order.
    pub fn products(&self) -> &[Product] {
        &self.data.products
    }

    /// Resolve a product by slug (case-sensitive).
    ///
    /// Returns `None` instead of erroring; an unknown slug is a normal
    /// outcome, not a fault.
    pub fn product_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products_by_slug
            .get(&Slug(slug.to_string()))
            .map(|&idx| &self.data.products[idx])
    }

    /// All manufacturers in load order.
    pub fn manufacturers(&self) -> &[Manufacturer] {
        &self.data.manufacturers
    }

    /// Resolve a manufacturer by its opaque id.
    pub fn manufacturer_by_id(&self, id: &str) -> Option<&Manufacturer> {
        self.manufacturers_by_id
            .get(&EntityId(id.to_string()))
            .map(|&idx| &self.data.manufacturers[idx])
    }

    /// Top-level categories in load order; children hang off each node.
    pub fn categories(&self) -> &[Category] {
        &self.data.categories
    }

    /// Resolve a top-level category by slug. Child categories are reached
    /// through their parent's subtree, not through this lookup.
    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories_by_slug
            .get(&Slug(slug.to_string()))
            .map(|&idx| &self.data.categories[idx])
    }

    /// All formats in load order.
    pub fn formats(&self) -> &[Format] {
        &self.data.formats
    }

    /// Resolve a format by slug (case-sensitive).
    pub fn format_by_slug(&self, slug: &str) -> Option<&Format> {
        self.formats_by_slug
            .get(&Slug(slug.to_string()))
            .map(|&idx| &self.data.formats[idx])
    }

    /// Formats whose slug appears in `slugs`, preserving catalog order rather
    /// than input order.
    ///
    /// `None` means no filter (all formats). `Some(&[])` matches nothing; the
    /// absent/empty distinction is part of the query contract and must not be
    /// collapsed.
    pub fn formats_by_slugs(&self, slugs: Option<&[String]>) -> Vec<&Format> {
        match slugs {
            None => self.data.formats.iter().collect(),
            Some(wanted) => self
                .data
                .formats
                .iter()
                .filter(|format| wanted.iter().any(|slug| slug == format.slug.as_str()))
                .collect(),
        }
    }

    /// Declared sort keys, in load order.
    pub fn sort_options(&self) -> &[SortOption] {
        &self.data.sort_options
    }
}

// The crate ships a single schema; reject catalogs tagged for anything else
// rather than risk serving entities with mismatched shapes.
fn validate_schema_version(schema_version: &str, expected: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }

    if !schema_version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!(
            "schema_version must match ^[A-Za-z0-9_.-]+$, got {}",
            schema_version
        );
    }

    if schema_version != expected {
        bail!("schema_version '{schema_version}' does not match expected '{expected}'");
    }

    Ok(())
}

fn index_by_slug<'a>(
    entity: &str,
    slugs: impl Iterator<Item = &'a Slug>,
) -> Result<BTreeMap<Slug, usize>> {
    let mut map = BTreeMap::new();
    for (idx, slug) in slugs.enumerate() {
        if slug.as_str().trim().is_empty() {
            bail!("encountered {entity} with an empty slug");
        }
        if map.insert(slug.clone(), idx).is_some() {
            bail!("duplicate {entity} slug {slug}");
        }
    }
    Ok(map)
}

fn index_manufacturers(manufacturers: &[Manufacturer]) -> Result<BTreeMap<EntityId, usize>> {
    let mut map = BTreeMap::new();
    for (idx, manufacturer) in manufacturers.iter().enumerate() {
        if manufacturer.id.0.trim().is_empty() {
            bail!("encountered manufacturer with no id");
        }
        if map.insert(manufacturer.id.clone(), idx).is_some() {
            bail!("duplicate manufacturer id {}", manufacturer.id);
        }
    }
    Ok(map)
}

/// Validate the raw payload against the schema and return the version the
/// schema declares.
fn validate_against_schema(catalog_path: &Path) -> Result<String> {
    let catalog_file = File::open(catalog_path)
        .with_context(|| format!("opening catalog {}", catalog_path.display()))?;
    let catalog_value: Value = serde_json::from_reader(BufReader::new(catalog_file))
        .with_context(|| format!("parsing catalog {}", catalog_path.display()))?;

    let schema_path = resolve_catalog_schema_path(catalog_path);
    let schema = load_json_schema(&schema_path)
        .with_context(|| format!("loading catalog schema {}", schema_path.display()))?;

    schema.validate(&catalog_value, catalog_path)?;
    Ok(schema.schema_version)
}

fn resolve_catalog_schema_path(catalog_path: &Path) -> PathBuf {
    if let Some(base) = catalog_path.parent().and_then(|p| p.parent()) {
        let candidate = base.join("schema/catalog.schema.json");
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schema/catalog.schema.json")
}
