use std::collections::BTreeMap;

use vera_core::errors::{ErrorInfo, VeraError};

/// Fractional digits used for bin labels unless configured otherwise.
pub const DEFAULT_LABEL_PRECISION: usize = 8;

/// Formats `log10(stellar_mass)` with `precision` fractional digits.
pub fn format_label(stellar_mass: f64, precision: usize) -> String {
    format!("{:.*}", precision, stellar_mass.log10())
}

/// Fails with [`VeraError::LabelCollision`] on the first label shared by two bins.
pub fn check_unique_labels<'a, I>(labels: I) -> Result<(), VeraError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for (index, label) in labels.into_iter().enumerate() {
        if let Some(first) = seen.insert(label, index) {
            return Err(VeraError::LabelCollision(
                ErrorInfo::new("label", "two bins share a directory label")
                    .with_bin(index, Some(label))
                    .with_context("first_bin", first.to_string())
                    .with_hint("raise label_precision or widen the mass range"),
            ));
        }
    }
    Ok(())
}
