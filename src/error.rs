use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The only failure the packing engine reports.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PackError {
    /// A full crate pass placed nothing: the remaining items cannot satisfy
    /// the space, weight or height limits of the configuration.
    #[error("{remaining} item(s) could not be placed, starting with {first}; check max dimensions")]
    FitFailure { remaining: usize, first: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("safety gap {gap} leaves no usable space on a {width}x{length} pallet")]
    GapTooLarge { gap: f64, width: f64, length: f64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ManifestError {
    #[error("item '{item}': {field} must be a positive number, got {value}")]
    InvalidDimension {
        item: String,
        field: &'static str,
        value: f64,
    },

    #[error("item '{item}': quantity {qty} exceeds the limit of {max}")]
    QuantityTooLarge { item: String, qty: u32, max: u32 },

    #[error("item label must not be empty")]
    EmptyLabel,

    #[error("manifest contains no items")]
    Empty,
}
