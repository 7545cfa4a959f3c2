//! Model registry for discovering the available valuation models.

use serde::Serialize;

/// Metadata about a valuation model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    /// Unique identifier for the model
    pub name: &'static str,

    /// Human-readable title
    pub title: &'static str,

    /// Formula, as printed by `intrinsic models --verbose`
    pub formula: &'static str,

    /// Record fields the model reads
    pub inputs: &'static [&'static str],

    /// Whether the model needs growth and discount rates
    pub uses_rates: bool,

    /// Whether the screener reports this model
    pub screened: bool,
}

/// Get information about all available models.
#[must_use]
pub fn available_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo {
            name: "graham",
            title: "Graham number",
            formula: "sqrt(22.5 * EPS * BVPS)",
            inputs: &["eps", "book_value_per_share"],
            uses_rates: false,
            screened: true,
        },
        ModelInfo {
            name: "dcf",
            title: "Discounted cash flow",
            formula: "sum_{i=1..n} EPS * (1+g)^i / (1+r)^i",
            inputs: &["eps"],
            uses_rates: true,
            screened: true,
        },
        ModelInfo {
            name: "ddm",
            title: "Dividend discount model",
            formula: "D * (1+g) / (r - g)",
            inputs: &["dividend_rate"],
            uses_rates: true,
            screened: false,
        },
    ]
}

/// Get information about a specific model by name (case-insensitive).
#[must_use]
pub fn get_model_info(name: &str) -> Option<ModelInfo> {
    available_models()
        .into_iter()
        .find(|info| info.name.eq_ignore_ascii_case(name))
}
