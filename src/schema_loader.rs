//! JSON Schema loader backing the catalog's structural validation.
//!
//! Loading compiles the schema once and keeps the raw document alive alongside
//! the compiled validator, so callers can validate any number of catalog
//! payloads against a single load.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

const SCHEMA_VERSION_POINTER: &str = "/properties/schema_version/const";

/// A compiled JSON Schema plus the version const it declares.
#[derive(Debug)]
pub(crate) struct CompiledSchema {
    pub schema_version: String,
    compiled: JSONSchema,
    // Keeps the schema document alive for the compiled validator, which holds
    // references into it.
    _raw: Arc<Value>,
}

impl CompiledSchema {
    /// Validate a catalog payload, flattening all schema errors into one
    /// message so operators see every structural problem at once.
    pub fn validate(&self, instance: &Value, origin: &Path) -> Result<()> {
        if let Err(errors) = self.compiled.validate(instance) {
            let details = errors
                .map(|err| err.to_string())
                .collect::<Vec<_>>()
                .join("\n");
            bail!(
                "catalog {} failed schema validation:\n{}",
                origin.display(),
                details
            );
        }
        Ok(())
    }
}

/// Load and compile the schema at `path`.
///
/// The schema must declare its version as a `const` on the `schema_version`
/// property; the store compares that const against the version tag in the
/// catalog file before deserializing.
pub(crate) fn load_json_schema(path: &Path) -> Result<CompiledSchema> {
    let schema_value: Value = serde_json::from_reader(
        File::open(path).with_context(|| format!("opening schema {}", path.display()))?,
    )
    .with_context(|| format!("parsing schema {}", path.display()))?;

    let schema_version = schema_value
        .pointer(SCHEMA_VERSION_POINTER)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            anyhow!(
                "schema {} missing schema_version const at {}",
                path.display(),
                SCHEMA_VERSION_POINTER
            )
        })?;

    let raw = Arc::new(schema_value);
    let raw_static: &'static Value = unsafe { &*(Arc::as_ptr(&raw)) };
    let compiled = JSONSchema::compile(raw_static)
        .map_err(|err| anyhow!("compiling schema {}: {err}", path.display()))?;

    Ok(CompiledSchema {
        schema_version,
        compiled,
        _raw: raw,
    })
}
