//! Shared library for the stockroom catalog service.
//!
//! The crate exposes the catalog store (validated, immutable entity
//! collections loaded from JSON) and the query engine that answers faceted,
//! paginated product queries over it. Public functions here form the contract
//! the helper binaries depend on: data-root discovery, catalog path
//! resolution, and CLI list parsing.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod query;
mod schema_loader;

pub use catalog::{
    CatalogData, CatalogStore, Category, Color, EntityId, Format, Image, Manufacturer, Material,
    Product, Slug, SortOption, load_catalog_from_path,
};
pub use query::{Page, ProductFilter, QueryEngine};

const CATALOG_FILE: &str = "data/catalog.json";
const SCHEMA_FILE: &str = "schema/catalog.schema.json";

/// Returns true when `candidate` looks like a stockroom data root.
///
/// Both the catalog file and its schema must be present; the load path needs
/// them together, so a directory with only one of the two is not usable.
fn is_data_root(candidate: &Path) -> bool {
    candidate.join(CATALOG_FILE).is_file() && candidate.join(SCHEMA_FILE).is_file()
}

/// Verifies that an explicit `STOCKROOM_ROOT` hint points at a valid root.
fn data_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_data_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_data_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the data root holding `data/catalog.json` and its schema.
///
/// Search order: honor `STOCKROOM_ROOT` if it points at a real root, fall
/// back to climbing up from the current executable, then use the build-time
/// hint. Callers can treat failure as fatal because the binaries cannot serve
/// queries without a catalog.
pub fn find_data_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var("STOCKROOM_ROOT") {
        if let Some(root) = data_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("STOCKROOM_ROOT_HINT") {
        if let Some(root) = data_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!(
        "Unable to locate a stockroom data root. Set STOCKROOM_ROOT to a directory containing {CATALOG_FILE} and {SCHEMA_FILE}."
    );
}

/// Resolve the catalog file the binaries should load.
///
/// `STOCKROOM_CATALOG` names an explicit file and wins outright; otherwise
/// the shipped catalog under the discovered data root is used.
pub fn resolve_catalog_path() -> Result<PathBuf> {
    if let Ok(explicit) = env::var("STOCKROOM_CATALOG") {
        if !explicit.is_empty() {
            let path = PathBuf::from(explicit);
            if !path.is_file() {
                bail!("STOCKROOM_CATALOG points at a missing file: {}", path.display());
            }
            return Ok(path);
        }
    }

    Ok(find_data_root()?.join(CATALOG_FILE))
}

/// Split comma- or whitespace-delimited CLI lists into tokens.
///
/// An empty string yields an empty list, which the filter contract treats as
/// "match nothing"; callers that mean "no filter" omit the flag entirely.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
