#![deny(missing_docs)]
#![doc = "Stellar mass binning and scaling-relation evaluation for the sweep driver."]

/// Per-bin parameter derivation.
pub mod generator;
/// Directory label formatting and uniqueness checks.
pub mod label;
/// Logarithmic sampling.
pub mod logspace;
/// Host galaxy scaling relations.
pub mod relations;

pub use generator::{
    generate_bins, generate_bins_with, BinSpec, BinTable, GalaxyType, MassBin,
};
pub use label::{check_unique_labels, format_label, DEFAULT_LABEL_PRECISION};
pub use logspace::logspace;
pub use relations::{ScalingRelations, StandardRelations, RELATION_CITATIONS};
