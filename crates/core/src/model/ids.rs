use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Author-assigned identifier of a lesson step.
///
/// Ids are opaque strings; review steps derive theirs from the source id
/// plus the configured review prefix.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(String);

impl StepId {
    /// Creates a new `StepId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Builds the id of the review clone of this step.
    #[must_use]
    pub fn review_id(&self, prefix: &str) -> Self {
        Self(format!("{prefix}{}", self.0))
    }
}

impl From<&str> for StepId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StepId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Unique identifier for one attempt at a lesson.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptId(Uuid);

impl AttemptId {
    /// Generates a fresh random attempt id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Debug for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StepId({})", self.0)
    }
}

impl fmt::Debug for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttemptId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

impl FromStr for AttemptId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_id_prefixes_source() {
        let id = StepId::new("q1");
        assert_eq!(id.review_id("review-"), StepId::new("review-q1"));
    }

    #[test]
    fn blank_step_id_is_empty() {
        assert!(StepId::new("  ").is_empty());
        assert!(!StepId::new("q").is_empty());
    }

    #[test]
    fn step_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&StepId::new("intro")).unwrap();
        assert_eq!(json, "\"intro\"");
    }

    #[test]
    fn attempt_id_roundtrip() {
        let original = AttemptId::generate();
        let parsed: AttemptId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn attempt_id_from_str_invalid() {
        assert!("not-a-uuid".parse::<AttemptId>().is_err());
    }
}
