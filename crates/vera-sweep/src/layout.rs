use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use vera_bins::GalaxyType;
use vera_core::errors::VeraError;

/// `<root>/{early,late}/<label>/` tree owned by one sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepLayout {
    root: PathBuf,
}

impl SweepLayout {
    /// Layout rooted at `root`, which should already be absolute.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Working root of the sweep.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<variant>`.
    pub fn variant_dir(&self, variant: GalaxyType) -> PathBuf {
        self.root.join(variant.dir_name())
    }

    /// `<root>/<variant>/<label>`.
    pub fn bin_dir(&self, variant: GalaxyType, label: &str) -> PathBuf {
        self.variant_dir(variant).join(label)
    }

    /// Creates the working root if it does not exist yet.
    pub fn ensure_root(&self) -> Result<&Path, VeraError> {
        ensure_dir(&self.root)?;
        Ok(&self.root)
    }

    /// Creates `<root>/<variant>` if needed.
    pub fn ensure_variant_dir(&self, variant: GalaxyType) -> Result<PathBuf, VeraError> {
        let dir = self.variant_dir(variant);
        ensure_dir(&dir)?;
        Ok(dir)
    }

    /// Creates `<root>/<variant>/<label>` if needed.
    pub fn ensure_bin_dir(&self, variant: GalaxyType, label: &str) -> Result<PathBuf, VeraError> {
        let dir = self.bin_dir(variant, label);
        ensure_dir(&dir)?;
        Ok(dir)
    }
}

fn ensure_dir(path: &Path) -> Result<(), VeraError> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|err| VeraError::directory_creation(path, err))?;
    debug!(path = %path.display(), "created directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_nest_variant_then_label() {
        let layout = SweepLayout::new("/runs");
        assert_eq!(
            layout.bin_dir(GalaxyType::Late, "10.50000000"),
            PathBuf::from("/runs/late/10.50000000")
        );
    }

    #[test]
    fn ensure_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let layout = SweepLayout::new(temp.path().join("root"));
        let first = layout.ensure_bin_dir(GalaxyType::Early, "9.0").unwrap();
        let second = layout.ensure_bin_dir(GalaxyType::Early, "9.0").unwrap();
        assert_eq!(first, second);
        assert!(first.is_dir());
        assert_eq!(fs::read_dir(layout.variant_dir(GalaxyType::Early)).unwrap().count(), 1);
    }

    #[test]
    fn file_in_the_way_is_a_creation_failure() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("early"), b"not a directory").unwrap();
        let layout = SweepLayout::new(temp.path());
        let err = layout.ensure_variant_dir(GalaxyType::Early).unwrap_err();
        assert!(matches!(err, VeraError::DirectoryCreation(_)));
    }
}
