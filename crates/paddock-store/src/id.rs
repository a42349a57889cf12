//! Record identifiers and identifier generation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The identifier of a record within its collection.
///
/// Identifiers are compared by their canonical text: a numeric identifier
/// value `5` and the path segment `"5"` address the same record.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for RecordId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RecordId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// How identifiers are generated for records created without one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// A per-store counter: `"1"`, `"2"`, `"3"`, ...
    #[default]
    Sequential,
    /// A time-ordered UUID (v7).
    Uuid,
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => f.write_str("sequential"),
            Self::Uuid => f.write_str("uuid"),
        }
    }
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "uuid" => Ok(Self::Uuid),
            other => Err(format!("unknown id strategy `{other}` (expected `sequential` or `uuid`)")),
        }
    }
}

/// Produces identifier candidates. Uniqueness against a collection is the
/// caller's job; the generator only promises fresh values for `Sequential`.
#[derive(Clone, Debug, Default)]
pub(crate) struct IdGenerator {
    strategy: IdStrategy,
    counter: u64,
}

impl IdGenerator {
    pub(crate) fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            counter: 0,
        }
    }

    pub(crate) fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    pub(crate) fn next_candidate(&mut self) -> RecordId {
        match self.strategy {
            IdStrategy::Sequential => {
                self.counter += 1;
                RecordId::new(self.counter.to_string())
            }
            IdStrategy::Uuid => RecordId::new(uuid::Uuid::now_v7().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_compares_with_str() {
        let id = RecordId::from("42");
        assert_eq!(id, "42");
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.to_string(), "42");
        assert_eq!(format!("{id:?}"), "RecordId(42)");
    }

    #[test]
    fn sequential_candidates_count_up() {
        let mut generator = IdGenerator::new(IdStrategy::Sequential);
        assert_eq!(generator.next_candidate(), "1");
        assert_eq!(generator.next_candidate(), "2");
        assert_eq!(generator.next_candidate(), "3");
    }

    #[test]
    fn uuid_candidates_differ() {
        let mut generator = IdGenerator::new(IdStrategy::Uuid);
        let a = generator.next_candidate();
        let b = generator.next_candidate();
        assert_ne!(a, b);
        assert!(uuid::Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn strategy_parse_and_display() {
        assert_eq!("sequential".parse::<IdStrategy>().unwrap(), IdStrategy::Sequential);
        assert_eq!("UUID".parse::<IdStrategy>().unwrap(), IdStrategy::Uuid);
        assert!("random".parse::<IdStrategy>().is_err());
        assert_eq!(IdStrategy::Uuid.to_string(), "uuid");
        assert_eq!(IdStrategy::default(), IdStrategy::Sequential);
    }

    #[test]
    fn strategy_serde_is_lowercase() {
        let json = serde_json::to_string(&IdStrategy::Uuid).unwrap();
        assert_eq!(json, "\"uuid\"");
        let back: IdStrategy = serde_json::from_str("\"sequential\"").unwrap();
        assert_eq!(back, IdStrategy::Sequential);
    }
}
