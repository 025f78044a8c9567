#![deny(missing_docs)]
#![doc = "Shared error surface, run configuration and serialization helpers for the stellar-mass sweep."]

pub mod config;
pub mod errors;
pub mod hash;
pub mod serde;

pub use crate::serde::{
    from_json_slice, from_yaml_slice, to_canonical_json_bytes, to_yaml_string,
};
pub use config::{
    load_config, parse_config, save_config, validate_label_precision, validate_range,
    SimulatorKnobs, SweepConfig, DEFAULT_PLOT_QUANTITIES, MAX_LABEL_PRECISION,
};
pub use errors::{ErrorInfo, VeraError};
pub use hash::{short_hash, stable_hash_string};
