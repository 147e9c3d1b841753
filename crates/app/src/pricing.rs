use std::collections::BTreeMap;
use std::fs;
use std::io::BufReader;
use std::path::Path;

use cost_core::{ModelPricing, PricingTable};

use crate::error::{AppError, Result};

/// Read an override file: a JSON object of model name → rates.
pub fn load_pricing_overrides(path: &Path) -> Result<BTreeMap<String, ModelPricing>> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(AppError::from)
}

/// Builtin rates merged with the override file at `path`, if any.
///
/// An unreadable or malformed override file is logged and ignored.
pub fn load_pricing_table(path: &Path) -> PricingTable {
    let table = PricingTable::builtin();
    if !path.exists() {
        return table;
    }
    match load_pricing_overrides(path) {
        Ok(overrides) => {
            tracing::debug!(path = %path.display(), models = overrides.len(), "loaded pricing overrides");
            table.with_overrides(overrides)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring pricing overrides");
            table
        }
    }
}
