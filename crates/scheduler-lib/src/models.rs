//! Core data model for schedule resolution

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Decimal SI suffixes accepted by [`Quantity::parse`]
const DECIMAL_SUFFIXES: &[&str] = &["m", "k", "M", "G", "T", "P", "E"];

/// Binary suffixes accepted by [`Quantity::parse`]
const BINARY_SUFFIXES: &[&str] = &["Ki", "Mi", "Gi", "Ti", "Pi", "Ei"];

/// An opaque amount-with-unit value, e.g. "200m" CPU or "10Mi" memory.
///
/// Only presence and identity matter during resolution; no arithmetic is
/// ever performed. [`Quantity::parse`] is the validating constructor used
/// at the configuration boundary; values arriving from the resource store
/// have already passed API validation and are wrapped with [`Quantity::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(String);

impl Quantity {
    /// Wrap an already-validated quantity string
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Parse and validate a quantity string: a decimal number followed by
    /// an optional SI ("m", "k", "M", ...) or binary ("Ki", "Mi", ...)
    /// suffix
    pub fn parse(value: &str) -> Result<Self, QuantityError> {
        if value.is_empty() {
            return Err(QuantityError::Empty);
        }

        let number = BINARY_SUFFIXES
            .iter()
            .chain(DECIMAL_SUFFIXES)
            .find_map(|suffix| value.strip_suffix(suffix))
            .unwrap_or(value);

        if number.is_empty() {
            return Err(QuantityError::MissingNumber(value.to_string()));
        }

        let mut seen_dot = false;
        for c in number.chars() {
            match c {
                '0'..='9' => {}
                '.' if !seen_dot => seen_dot = true,
                _ => return Err(QuantityError::InvalidNumber(value.to_string())),
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Quantity syntax error reported at the configuration boundary
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantityError {
    #[error("quantity is empty")]
    Empty,
    #[error("quantity {0:?} has no numeric part")]
    MissingNumber(String),
    #[error("quantity {0:?} is not a decimal number with an optional unit suffix")]
    InvalidNumber(String),
}

/// Per-resource-name quantities for one side (requests or limits) of a
/// requirement set. Unset entries are absent, never zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<Quantity>,
}

impl ResourceList {
    pub fn is_empty(&self) -> bool {
        self.cpu.is_none() && self.memory.is_none()
    }
}

/// Compute resource requirements to attach to a generated job.
///
/// The four (requests/limits × cpu/memory) entries are the four independent
/// resolution dimensions; they never interact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequirements {
    #[serde(default, skip_serializing_if = "ResourceList::is_empty")]
    pub requests: ResourceList,
    #[serde(default, skip_serializing_if = "ResourceList::is_empty")]
    pub limits: ResourceList,
}

impl ResourceRequirements {
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty() && self.limits.is_empty()
    }
}

/// The kind of managed job a schedule entry belongs to.
///
/// Each job type maintains its own independently cached effective schedule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Backup,
    Check,
    Prune,
    Restore,
    Archive,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Backup => "backup",
            JobType::Check => "check",
            JobType::Prune => "prune",
            JobType::Restore => "restore",
            JobType::Archive => "archive",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
