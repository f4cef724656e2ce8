//! Domain identifier types with validation
//!
//! Collaborator IDs and report IDs are opaque strings handed out by the data
//! engine. The newtypes keep them from being mixed up with each other or with
//! account numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Collaborator identifier newtype wrapper
///
/// Identifies a remote-managed dataset (provider or consumer) on the data engine.
///
/// # Examples
///
/// ```
/// use fraudshare::domain::ids::CollaboratorId;
/// use std::str::FromStr;
///
/// let id = CollaboratorId::from_str("c0ffee-bank-a").unwrap();
/// assert_eq!(id.as_str(), "c0ffee-bank-a");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollaboratorId(String);

impl CollaboratorId {
    /// Creates a new CollaboratorId, rejecting blank values
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Collaborator ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the collaborator ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CollaboratorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CollaboratorId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for CollaboratorId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Quality report identifier returned when a validation run is started
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(String);

impl ReportId {
    /// Creates a new ReportId, rejecting blank values
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Report ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the report ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ReportId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
