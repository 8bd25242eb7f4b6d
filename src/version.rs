//! # Version Triples
//!
//! A `Version` is a `major.minor.revision` triple of signed integers. Unlike
//! full semantic versioning there are no pre-release or build components:
//! a string is valid only if it splits into exactly three dot-separated
//! base-10 integers.
//!
//! `Version::compare` returns the raw arithmetic difference of the first
//! component that differs rather than a clamped sign, so
//! `compare(1.5.0, 1.2.0) == 3`. Callers that only care about ordering should
//! use `Ord` instead.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// A `major.minor.revision` version triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Version {
    pub major: i64,
    pub minor: i64,
    pub revision: i64,
}

impl Version {
    pub const fn new(major: i64, minor: i64, revision: i64) -> Self {
        Self {
            major,
            minor,
            revision,
        }
    }

    /// Parses a `major.minor.revision` string.
    ///
    /// Each part is parsed with `i64::from_str`, so a single leading `+` or
    /// `-` is accepted. Whitespace is not.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidVersion {
            input: s.to_string(),
        };

        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }

        let component = |part: &str| part.parse::<i64>().map_err(|_| invalid());

        Ok(Self {
            major: component(parts[0])?,
            minor: component(parts[1])?,
            revision: component(parts[2])?,
        })
    }

    /// Returns the first non-zero difference among (major, minor, revision),
    /// or zero when the triples are equal.
    ///
    /// The magnitude is the raw difference, saturated at the `i64` bounds so
    /// the sign is always correct.
    pub fn compare(&self, other: &Version) -> i64 {
        [
            self.major.saturating_sub(other.major),
            self.minor.saturating_sub(other.minor),
            self.revision.saturating_sub(other.revision),
        ]
        .into_iter()
        .find(|diff| *diff != 0)
        .unwrap_or(0)
    }

    /// Same as `compare`, reduced to an `Ordering`.
    pub fn ordering(&self, other: &Version) -> Ordering {
        self.compare(other).cmp(&0)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.revision)
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Version::parse(&s).map_err(serde::de::Error::custom)
    }
}
