//! CollaboratorId value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A type-safe wrapper for the remote API's numeric record ids.
///
/// Ids arrive as route parameters, so parsing from text is the common path.
///
/// # Example
///
/// ```
/// use collaborator_form::domain::CollaboratorId;
///
/// let id: CollaboratorId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
/// assert!("".parse::<CollaboratorId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollaboratorId(u64);

impl CollaboratorId {
    /// Create a new CollaboratorId, rejecting zero.
    pub fn new(id: u64) -> Result<Self, ValidationError> {
        if id == 0 {
            return Err(ValidationError::InvalidId(id.to_string()));
        }
        Ok(Self(id))
    }

    /// Get the numeric id.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl FromStr for CollaboratorId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let id = trimmed
            .parse::<u64>()
            .map_err(|_| ValidationError::InvalidId(s.to_string()))?;
        Self::new(id)
    }
}

impl Serialize for CollaboratorId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for CollaboratorId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = u64::deserialize(deserializer)?;
        CollaboratorId::new(id).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for CollaboratorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
