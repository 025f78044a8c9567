//! Structured error types shared across the sweep crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`VeraError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (paths, masses, labels, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Adds the display form of a path as a context entry.
    pub fn with_path(self, key: impl Into<String>, path: &Path) -> Self {
        self.with_context(key, path.display().to_string())
    }

    /// Tags the payload with the mass bin it concerns.
    pub fn with_bin(self, index: usize, label: Option<&str>) -> Self {
        let info = self.with_context("bin", index.to_string());
        match label {
            Some(label) => info.with_context("label", label),
            None => info,
        }
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the sweep driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum VeraError {
    /// Mass range, bin count or ceiling violates ordering or positivity.
    #[error("invalid range: {0}")]
    InvalidRange(ErrorInfo),
    /// Two bins formatted to the same directory label.
    #[error("label collision: {0}")]
    LabelCollision(ErrorInfo),
    /// Simulator or plotter path does not resolve to a file.
    #[error("missing executable: {0}")]
    MissingExecutable(ErrorInfo),
    /// A required directory could not be created.
    #[error("directory creation failure: {0}")]
    DirectoryCreation(ErrorInfo),
    /// Configuration file could not be read or is inconsistent.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and report persistence errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl VeraError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            VeraError::InvalidRange(info)
            | VeraError::LabelCollision(info)
            | VeraError::MissingExecutable(info)
            | VeraError::DirectoryCreation(info)
            | VeraError::Config(info)
            | VeraError::Serde(info) => info,
        }
    }

    /// Shorthand for an [`VeraError::InvalidRange`] with the given code.
    pub fn invalid_range(code: &str, message: impl Into<String>) -> Self {
        VeraError::InvalidRange(ErrorInfo::new(code, message))
    }

    /// Wraps a filesystem error raised while creating `path`.
    pub fn directory_creation(path: &Path, err: impl ToString) -> Self {
        VeraError::DirectoryCreation(
            ErrorInfo::new("mkdir", err.to_string())
                .with_path("path", path)
                .with_hint("check permissions and free space under the working root"),
        )
    }
}
