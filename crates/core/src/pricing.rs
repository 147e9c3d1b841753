use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::TokenCounts;

/// Model whose builtin rates price anything the table cannot resolve.
pub const BASELINE_MODEL: &str = "claude-sonnet-4-6";

const BASELINE_PRICING: ModelPricing = ModelPricing::new(3.0, 15.0, 3.75, 0.3);

const BUILTIN_PRICING: &[(&str, ModelPricing)] = &[
    ("claude-opus-4-6", ModelPricing::new(5.0, 25.0, 6.25, 0.5)),
    (
        "claude-opus-4-5-20251101",
        ModelPricing::new(5.0, 25.0, 6.25, 0.5),
    ),
    (BASELINE_MODEL, BASELINE_PRICING),
    (
        "claude-sonnet-4-5-20250929",
        ModelPricing::new(3.0, 15.0, 3.75, 0.3),
    ),
    (
        "claude-haiku-4-5-20251001",
        ModelPricing::new(1.0, 5.0, 1.25, 0.1),
    ),
];

/// USD rates per million tokens. Field names match the override file format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
    pub cache_create_per_million: f64,
    pub cache_read_per_million: f64,
}

impl ModelPricing {
    pub const fn new(input: f64, output: f64, cache_create: f64, cache_read: f64) -> Self {
        Self {
            input_per_million: input,
            output_per_million: output,
            cache_create_per_million: cache_create,
            cache_read_per_million: cache_read,
        }
    }

    pub fn cost(&self, tokens: &TokenCounts) -> f64 {
        (tokens.input_tokens as f64 * self.input_per_million / 1_000_000.0)
            + (tokens.output_tokens as f64 * self.output_per_million / 1_000_000.0)
            + (tokens.cache_creation_input_tokens as f64 * self.cache_create_per_million
                / 1_000_000.0)
            + (tokens.cache_read_input_tokens as f64 * self.cache_read_per_million / 1_000_000.0)
    }
}

/// How a model name was resolved against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceSource {
    Exact,
    /// Substring match in either direction against this key.
    Matched(String),
    Fallback,
}

/// Models priced with the baseline rates because no entry matched.
///
/// Only `claude-` names are recorded; other names fall back silently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnknownModels(BTreeSet<String>);

impl UnknownModels {
    pub fn record(&mut self, model: &str) {
        if model.starts_with("claude-") {
            self.0.insert(model.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

/// Immutable rate table, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingTable {
    rates: BTreeMap<String, ModelPricing>,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PricingTable {
    pub fn builtin() -> Self {
        let rates = BUILTIN_PRICING
            .iter()
            .map(|(model, pricing)| (model.to_string(), *pricing))
            .collect();
        Self { rates }
    }

    /// Merge `overrides` over the current rates; overrides win on collision.
    pub fn with_overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, ModelPricing)>,
    {
        self.rates.extend(overrides);
        self
    }

    pub fn rates(&self) -> &BTreeMap<String, ModelPricing> {
        &self.rates
    }

    pub fn lookup(&self, model: &str) -> (ModelPricing, PriceSource) {
        if let Some(pricing) = self.rates.get(model) {
            return (*pricing, PriceSource::Exact);
        }
        if let Some((key, pricing)) = self
            .rates
            .iter()
            .find(|(key, _)| model.contains(key.as_str()) || key.contains(model))
        {
            return (*pricing, PriceSource::Matched(key.clone()));
        }
        (BASELINE_PRICING, PriceSource::Fallback)
    }

    /// Cost in USD; unresolved names are recorded in `unknown`.
    pub fn cost(&self, model: &str, tokens: &TokenCounts, unknown: &mut UnknownModels) -> f64 {
        let (pricing, source) = self.lookup(model);
        if source == PriceSource::Fallback {
            unknown.record(model);
        }
        pricing.cost(tokens)
    }
}
