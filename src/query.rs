//! Read-only query surface over a loaded catalog.
//!
//! The engine answers two shapes over products, a paginated listing and a
//! count, under one shared facet predicate, plus passthrough lookups for the
//! remaining entity collections. Every operation is a pure read of the
//! immutable [`CatalogStore`], so concurrent queries need no synchronization.

use crate::catalog::{CatalogStore, Category, Format, Manufacturer, Product, SortOption};

/// Facet criteria shared by the listing and count operations.
///
/// Each criterion is independent and passes everything when absent. A present
/// but empty `formats` or `manufacturers` list matches nothing; callers that
/// mean "no filter" must omit the criterion, not supply an empty list. The
/// two cases are distinct on purpose and must not be collapsed into one
/// falsy check.
#[derive(Clone, Debug, Default)]
pub struct ProductFilter {
    /// Case-sensitive exact match against the product's category slugs.
    pub category: Option<String>,
    /// Case-insensitive match: at least one requested slug must match at
    /// least one of the product's format slugs.
    pub formats: Option<Vec<String>>,
    /// Case-sensitive exact match against the product's manufacturer slug.
    pub manufacturers: Option<Vec<String>>,
}

impl ProductFilter {
    /// Whether `product` survives all three facets, evaluated in the fixed
    /// order category, format, manufacturer.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_category(product)
            && self.matches_formats(product)
            && self.matches_manufacturers(product)
    }

    fn matches_category(&self, product: &Product) -> bool {
        match &self.category {
            Some(slug) => product.categories.iter().any(|c| c.as_str() == slug),
            None => true,
        }
    }

    fn matches_formats(&self, product: &Product) -> bool {
        match &self.formats {
            Some(wanted) => wanted.iter().any(|requested| {
                product
                    .formats
                    .iter()
                    .any(|format| format.matches_ignore_case(requested))
            }),
            None => true,
        }
    }

    fn matches_manufacturers(&self, product: &Product) -> bool {
        match &self.manufacturers {
            Some(wanted) => wanted
                .iter()
                .any(|slug| slug == product.manufacturer.slug.as_str()),
            None => true,
        }
    }
}

/// One page of results, 1-based.
///
/// The engine does not validate page numbers or sizes; an out-of-range page
/// yields an empty slice rather than an error, and a zero page number is
/// clamped to the first page instead of underflowing. Supplying sane values
/// is the caller's responsibility.
#[derive(Clone, Copy, Debug)]
pub struct Page {
    pub number: usize,
    pub size: usize,
}

impl Page {
    pub fn new(number: usize, size: usize) -> Self {
        Self { number, size }
    }

    fn bounds(&self, len: usize) -> (usize, usize) {
        let start = self.number.saturating_sub(1).saturating_mul(self.size);
        let end = start.saturating_add(self.size).min(len);
        (start.min(len), end)
    }
}

/// Query engine over one catalog snapshot.
///
/// Construction takes the store explicitly; there is no ambient global. The
/// borrow also guarantees no query can outlive or mutate the snapshot.
pub struct QueryEngine<'a> {
    store: &'a CatalogStore,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a CatalogStore) -> Self {
        Self { store }
    }

    /// Filtered, paginated product listing in catalog order.
    ///
    /// Filtering is stable: survivors keep their load order. `sort_key` is
    /// accepted for interface compatibility, but the declared sort options
    /// carry no comparator, so the key never reorders results.
    pub fn list_products(
        &self,
        page: Page,
        sort_key: Option<&str>,
        filter: &ProductFilter,
    ) -> Vec<&'a Product> {
        let _ = sort_key;
        let filtered: Vec<&Product> = self
            .store
            .products()
            .iter()
            .filter(|product| filter.matches(product))
            .collect();

        let (start, end) = page.bounds(filtered.len());
        filtered[start..end].to_vec()
    }

    /// Count of products surviving the same predicate as [`Self::list_products`].
    ///
    /// Always equals the length of an unpaginated listing under the same
    /// filter.
    pub fn count_products(&self, filter: &ProductFilter) -> usize {
        self.store
            .products()
            .iter()
            .filter(|product| filter.matches(product))
            .count()
    }

    /// Single product by slug, or `None`.
    pub fn product(&self, slug: &str) -> Option<&'a Product> {
        self.store.product_by_slug(slug)
    }

    /// All manufacturers in catalog order.
    pub fn manufacturers(&self) -> &'a [Manufacturer] {
        self.store.manufacturers()
    }

    /// Single manufacturer by id, or `None`.
    pub fn manufacturer(&self, id: &str) -> Option<&'a Manufacturer> {
        self.store.manufacturer_by_id(id)
    }

    /// The top-level category tree in catalog order.
    pub fn categories(&self) -> &'a [Category] {
        self.store.categories()
    }

    /// Single top-level category by slug, or `None`.
    pub fn category(&self, slug: &str) -> Option<&'a Category> {
        self.store.category_by_slug(slug)
    }

    /// Formats, optionally narrowed to the given slugs (catalog order).
    pub fn formats(&self, slugs: Option<&[String]>) -> Vec<&'a Format> {
        self.store.formats_by_slugs(slugs)
    }

    /// Single format by slug, or `None`.
    pub fn format(&self, slug: &str) -> Option<&'a Format> {
        self.store.format_by_slug(slug)
    }

    /// Declared sort keys in catalog order.
    pub fn sort_options(&self) -> &'a [SortOption] {
        self.store.sort_options()
    }
}
