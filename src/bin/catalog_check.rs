//! Operator-facing catalog validation.
//!
//! Loads a catalog file through the same validated path the query binaries
//! use, then prints a JSON summary of what was loaded. A structurally invalid
//! or missing catalog fails here with the full error chain, before anything
//! tries to serve queries from it.

use anyhow::Result;
use serde::Serialize;
use stockroom::{CatalogStore, Category, resolve_catalog_path};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

#[derive(Serialize)]
struct Summary {
    catalog: String,
    schema_version: String,
    products: usize,
    categories: usize,
    categories_total: usize,
    manufacturers: usize,
    formats: usize,
    sort_options: usize,
}

fn run() -> Result<()> {
    let catalog_path = match parse_args()? {
        Some(explicit) => explicit,
        None => resolve_catalog_path()?,
    };

    let store = CatalogStore::load(&catalog_path)?;

    let summary = Summary {
        catalog: catalog_path.display().to_string(),
        schema_version: store.schema_version().to_string(),
        products: store.products().len(),
        categories: store.categories().len(),
        categories_total: store.categories().iter().map(count_tree).sum(),
        manufacturers: store.manufacturers().len(),
        formats: store.formats().len(),
        sort_options: store.sort_options().len(),
    };

    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

fn count_tree(category: &Category) -> usize {
    1 + category
        .child_categories
        .iter()
        .map(count_tree)
        .sum::<usize>()
}

fn parse_args() -> Result<Option<PathBuf>> {
    let mut explicit = None;
    for arg_os in env::args_os().skip(1) {
        let arg = arg_os
            .into_string()
            .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
        match arg.as_str() {
            "--help" | "-h" => {
                println!(
                    "Usage: catalog-check [PATH]\n\
Validates the catalog at PATH (default: the discovered data root's catalog)\n\
and prints a JSON summary. Exits nonzero if the catalog fails to load."
                );
                std::process::exit(0);
            }
            other if other.starts_with('-') => anyhow::bail!("unknown flag: {other}"),
            other => {
                if explicit.is_some() {
                    anyhow::bail!("at most one catalog path may be given");
                }
                explicit = Some(PathBuf::from(other));
            }
        }
    }
    Ok(explicit)
}
