//! End-to-end coverage over the shipped catalog: library queries first, then
//! the helper binaries driven the way operators and scripts invoke them.

mod support;

use serde_json::Value;
use std::io::Write;
use std::process::Command;
use stockroom::{CatalogStore, Page, ProductFilter, QueryEngine, split_list};
use support::{data_root, helper_binary, run_command, shipped_catalog};
use tempfile::NamedTempFile;

fn shipped_store() -> CatalogStore {
    CatalogStore::load(&shipped_catalog()).expect("shipped catalog should load")
}

fn listed_slugs(engine: &QueryEngine<'_>, filter: &ProductFilter) -> Vec<String> {
    engine
        .list_products(Page::new(1, 100), None, filter)
        .iter()
        .map(|p| p.slug.to_string())
        .collect()
}

#[test]
fn shipped_catalog_loads_with_expected_collections() {
    let store = shipped_store();
    assert_eq!(store.schema_version(), "product_catalog_v1");
    assert_eq!(store.products().len(), 6);
    assert_eq!(store.categories().len(), 3);
    assert_eq!(store.manufacturers().len(), 3);
    assert_eq!(store.formats().len(), 4);
    assert_eq!(store.sort_options().len(), 4);
}

#[test]
fn category_facet_narrows_to_subtree_members() {
    let store = shipped_store();
    let engine = QueryEngine::new(&store);

    let chairs = ProductFilter {
        category: Some("chairs".to_string()),
        ..ProductFilter::default()
    };
    assert_eq!(
        listed_slugs(&engine, &chairs),
        vec!["club-chair", "ladder-back-chair"]
    );

    // Products tag every ancestor slug they belong to, so the parent facet
    // catches everything under it.
    let seating = ProductFilter {
        category: Some("seating".to_string()),
        ..ProductFilter::default()
    };
    assert_eq!(engine.count_products(&seating), 3);
}

#[test]
fn format_facet_is_case_insensitive_over_shipped_data() {
    let store = shipped_store();
    let engine = QueryEngine::new(&store);
    let filter = ProductFilter {
        formats: Some(vec!["WIDE".to_string()]),
        ..ProductFilter::default()
    };
    assert_eq!(
        listed_slugs(&engine, &filter),
        vec!["drift-sofa", "trestle-table"]
    );
}

#[test]
fn manufacturer_facet_counts_match_listing() {
    let store = shipped_store();
    let engine = QueryEngine::new(&store);
    let filter = ProductFilter {
        manufacturers: Some(vec!["norrland-studio".to_string()]),
        ..ProductFilter::default()
    };
    assert_eq!(engine.count_products(&filter), 2);
    assert_eq!(
        engine.count_products(&filter),
        listed_slugs(&engine, &filter).len()
    );
}

#[test]
fn pagination_walks_the_shipped_catalog_without_gaps() {
    let store = shipped_store();
    let engine = QueryEngine::new(&store);
    let filter = ProductFilter::default();

    let first = engine.list_products(Page::new(1, 4), None, &filter);
    let second = engine.list_products(Page::new(2, 4), None, &filter);
    let third = engine.list_products(Page::new(3, 4), None, &filter);
    assert_eq!(first.len(), 4);
    assert_eq!(second.len(), 2);
    assert!(third.is_empty());

    let mut walked: Vec<&str> = Vec::new();
    walked.extend(first.iter().map(|p| p.slug.as_str()));
    walked.extend(second.iter().map(|p| p.slug.as_str()));
    let full: Vec<&str> = store.products().iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(walked, full);
}

#[test]
fn category_lookup_addresses_top_level_nodes_only() {
    let store = shipped_store();
    let seating = store.category_by_slug("seating").expect("seating exists");
    assert_eq!(seating.child_categories.len(), 2);
    // Children are reached through the tree, not the top-level lookup.
    assert!(store.category_by_slug("chairs").is_none());
}

#[test]
fn split_list_accepts_commas_and_whitespace() {
    assert_eq!(split_list("wide,round"), vec!["wide", "round"]);
    assert_eq!(split_list("wide round"), vec!["wide", "round"]);
    assert_eq!(split_list(" wide ,  round "), vec!["wide", "round"]);
    assert!(split_list("").is_empty());
}

fn stockroom_command(args: &[&str]) -> Command {
    let root = data_root();
    let mut cmd = Command::new(helper_binary(&root, "stockroom"));
    cmd.arg(args[0]);
    cmd.args(&args[1..]);
    cmd.arg("--catalog");
    cmd.arg(root.join("data/catalog.json"));
    cmd
}

fn stdout_json(args: &[&str]) -> Value {
    let output = run_command(stockroom_command(args)).expect("command should succeed");
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn cli_products_lists_filtered_slugs() {
    let value = stdout_json(&["products", "--category", "chairs", "--per-page", "10"]);
    let slugs: Vec<&str> = value
        .as_array()
        .expect("products output is an array")
        .iter()
        .map(|p| p["slug"].as_str().expect("product has a slug"))
        .collect();
    assert_eq!(slugs, vec!["club-chair", "ladder-back-chair"]);
}

#[test]
fn cli_count_agrees_with_products_listing() {
    let count = stdout_json(&["count", "--manufacturers", "norrland-studio"]);
    assert_eq!(count, Value::from(2));
}

#[test]
fn cli_product_prints_null_for_unknown_slug() {
    let value = stdout_json(&["product", "nonexistent-slug"]);
    assert!(value.is_null());
}

#[test]
fn cli_formats_distinguishes_missing_flag_from_empty_list() {
    let all = stdout_json(&["formats"]);
    assert_eq!(all.as_array().map(Vec::len), Some(4));

    let none = stdout_json(&["formats", "--slugs", ""]);
    assert_eq!(none.as_array().map(Vec::len), Some(0));
}

#[test]
fn cli_formats_preserves_catalog_order() {
    let picked = stdout_json(&["formats", "--slugs", "wide,standard"]);
    let slugs: Vec<&str> = picked
        .as_array()
        .expect("formats output is an array")
        .iter()
        .map(|f| f["slug"].as_str().expect("format has a slug"))
        .collect();
    assert_eq!(slugs, vec!["standard", "wide"]);
}

#[test]
fn cli_sort_options_pass_through() {
    let value = stdout_json(&["sort-options"]);
    let slugs: Vec<&str> = value
        .as_array()
        .expect("sort options output is an array")
        .iter()
        .map(|s| s["slug"].as_str().expect("sort option has a slug"))
        .collect();
    assert_eq!(slugs, vec!["newest", "price-asc", "price-desc", "name"]);
}

#[test]
fn cli_resolves_the_shipped_catalog_without_flags() {
    let root = data_root();
    let mut cmd = Command::new(helper_binary(&root, "stockroom"));
    cmd.arg("count");
    let output = run_command(cmd).expect("discovery should find the shipped catalog");
    let count: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(count, Value::from(6));
}

#[test]
fn cli_rejects_unknown_commands_and_flags() {
    let root = data_root();

    let unknown = Command::new(helper_binary(&root, "stockroom"))
        .arg("frobnicate")
        .output()
        .expect("binary should run");
    assert!(!unknown.status.success());
    assert!(
        String::from_utf8_lossy(&unknown.stderr).contains("unknown command"),
        "stderr should name the unknown command"
    );

    let bad_flag = Command::new(helper_binary(&root, "stockroom"))
        .args(["products", "--frobnicate"])
        .output()
        .expect("binary should run");
    assert!(!bad_flag.status.success());
}

#[test]
fn catalog_check_summarizes_the_shipped_catalog() {
    let root = data_root();
    let mut cmd = Command::new(helper_binary(&root, "catalog-check"));
    cmd.arg(root.join("data/catalog.json"));
    let output = run_command(cmd).expect("check should pass on shipped data");
    let summary: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(summary["schema_version"], "product_catalog_v1");
    assert_eq!(summary["products"], 6);
    assert_eq!(summary["categories"], 3);
    assert_eq!(summary["categories_total"], 6);
    assert_eq!(summary["manufacturers"], 3);
    assert_eq!(summary["formats"], 4);
    assert_eq!(summary["sort_options"], 4);
}

#[test]
fn catalog_check_fails_on_malformed_data() {
    let root = data_root();
    let mut file = NamedTempFile::new().expect("create temp catalog");
    file.write_all(br#"{"schema_version": "product_catalog_v1"}"#)
        .expect("write temp catalog");

    let output = Command::new(helper_binary(&root, "catalog-check"))
        .arg(file.path())
        .output()
        .expect("binary should run");
    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("failed schema validation"),
        "stderr should carry the schema validation failure"
    );
}
