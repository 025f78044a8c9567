use std::fmt;

use serde::{Deserialize, Serialize};
use vera_core::config::{validate_label_precision, validate_range, SweepConfig};
use vera_core::errors::{ErrorInfo, VeraError};

use crate::label::{check_unique_labels, format_label, DEFAULT_LABEL_PRECISION};
use crate::logspace::logspace;
use crate::relations::{ScalingRelations, StandardRelations};

/// Morphological class of the host galaxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalaxyType {
    /// Early-type (elliptical / lenticular) host.
    Early,
    /// Late-type (spiral) host.
    Late,
}

impl GalaxyType {
    /// Both variants in sweep order.
    pub const ALL: [GalaxyType; 2] = [GalaxyType::Early, GalaxyType::Late];

    /// Directory name used under the working root.
    pub fn dir_name(self) -> &'static str {
        match self {
            GalaxyType::Early => "early",
            GalaxyType::Late => "late",
        }
    }
}

impl fmt::Display for GalaxyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Parameters for one sampled point in the stellar mass sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassBin {
    /// Position of the bin in ascending stellar mass order.
    pub index: usize,
    /// Galactic stellar mass.
    pub stellar_mass: f64,
    /// Supermassive black hole mass (never clamped).
    pub smbh_mass: f64,
    /// Early-type nuclear star cluster mass, clamped to the ceiling.
    pub early_cluster_mass: f64,
    /// Late-type nuclear star cluster mass, clamped to the ceiling.
    pub late_cluster_mass: f64,
    /// Directory name for this bin.
    pub label: String,
}

impl MassBin {
    /// Clamped cluster mass for the given host type.
    pub fn cluster_mass(&self, variant: GalaxyType) -> f64 {
        match variant {
            GalaxyType::Early => self.early_cluster_mass,
            GalaxyType::Late => self.late_cluster_mass,
        }
    }
}

/// Inputs to bin generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinSpec {
    /// Lowest stellar mass, used verbatim for the first bin.
    pub mass_min: f64,
    /// Highest stellar mass, used verbatim for the last bin.
    pub mass_max: f64,
    /// Number of bins to produce.
    pub bin_count: usize,
    /// Ceiling applied independently to both cluster masses.
    pub cluster_mass_ceiling: f64,
    /// Fractional digits in the bin labels.
    pub label_precision: usize,
}

impl BinSpec {
    /// Spec with the default label precision.
    pub fn new(mass_min: f64, mass_max: f64, bin_count: usize, ceiling: f64) -> Self {
        Self {
            mass_min,
            mass_max,
            bin_count,
            cluster_mass_ceiling: ceiling,
            label_precision: DEFAULT_LABEL_PRECISION,
        }
    }

    /// Extracts the binning parameters from a sweep configuration.
    pub fn from_config(config: &SweepConfig) -> Self {
        Self {
            mass_min: config.mass_min,
            mass_max: config.mass_max,
            bin_count: config.bin_count,
            cluster_mass_ceiling: config.cluster_mass_ceiling,
            label_precision: config.label_precision,
        }
    }

    /// Checks ordering and positivity of the range, count and ceiling, and
    /// that the label precision is formattable.
    pub fn validate(&self) -> Result<(), VeraError> {
        validate_range(
            self.mass_min,
            self.mass_max,
            self.bin_count,
            self.cluster_mass_ceiling,
        )?;
        validate_label_precision(self.label_precision)
    }
}

/// Ordered bins with distinct labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinTable {
    spec: BinSpec,
    bins: Vec<MassBin>,
}

impl BinTable {
    /// Spec the table was generated from.
    pub fn spec(&self) -> &BinSpec {
        &self.spec
    }

    /// Bins in ascending stellar mass order.
    pub fn bins(&self) -> &[MassBin] {
        &self.bins
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// True when the table holds no bins; never the case for generated tables.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Label assigned to bin `index`.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.bins.get(index).map(|bin| bin.label.as_str())
    }

    /// Iterates over the bins in ascending stellar mass order.
    pub fn iter(&self) -> std::slice::Iter<'_, MassBin> {
        self.bins.iter()
    }
}

impl<'a> IntoIterator for &'a BinTable {
    type Item = &'a MassBin;
    type IntoIter = std::slice::Iter<'a, MassBin>;

    fn into_iter(self) -> Self::IntoIter {
        self.bins.iter()
    }
}

/// Generates bins with [`StandardRelations`] and the default label precision.
pub fn generate_bins(
    mass_min: f64,
    mass_max: f64,
    bin_count: usize,
    ceiling: f64,
) -> Result<BinTable, VeraError> {
    generate_bins_with(
        &BinSpec::new(mass_min, mass_max, bin_count, ceiling),
        &StandardRelations,
    )
}

/// Samples `spec.bin_count` log-uniform stellar masses and evaluates `relations`
/// at each, clamping both cluster masses to the ceiling.
pub fn generate_bins_with<R: ScalingRelations + ?Sized>(
    spec: &BinSpec,
    relations: &R,
) -> Result<BinTable, VeraError> {
    spec.validate()?;
    let ceiling = spec.cluster_mass_ceiling;
    let bins = logspace(spec.mass_min, spec.mass_max, spec.bin_count)
        .into_iter()
        .enumerate()
        .map(|(index, stellar_mass)| -> Result<MassBin, VeraError> {
            let smbh_mass = derived(index, "smbh_mass", relations.smbh_mass(stellar_mass))?;
            let early = derived(index, "early_nsc", relations.early_nsc_mass(stellar_mass))?;
            let late = derived(index, "late_nsc", relations.late_nsc_mass(stellar_mass))?;
            Ok(MassBin {
                index,
                stellar_mass,
                smbh_mass,
                early_cluster_mass: early.min(ceiling),
                late_cluster_mass: late.min(ceiling),
                label: format_label(stellar_mass, spec.label_precision),
            })
        })
        .collect::<Result<Vec<_>, VeraError>>()?;
    check_unique_labels(bins.iter().map(|bin| bin.label.as_str()))?;
    Ok(BinTable { spec: *spec, bins })
}

fn derived(index: usize, quantity: &str, value: f64) -> Result<f64, VeraError> {
    if value.is_finite() && value > 0.0 {
        return Ok(value);
    }
    Err(VeraError::InvalidRange(
        ErrorInfo::new("derived_mass", "scaling relation produced a non-physical mass")
            .with_bin(index, None)
            .with_context("quantity", quantity)
            .with_context("value", value.to_string()),
    ))
}
