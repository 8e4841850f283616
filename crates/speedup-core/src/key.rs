// Speedup - parallel search benchmark result reduction
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Benchmark configuration keys.
//!
//! A [`ConfigKey`] identifies one benchmark condition and is the only join key
//! between pipeline stages. Keys order lexicographically by
//! `(variant, t, a)`; an absent partition count sorts before every value.

use crate::error::RecordError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Serialized form of an absent partition count.
pub const ABSENT: &str = "None";

/// The algorithm being benchmarked.
///
/// Declaration order matches the lexicographic order of the names, so the
/// derived `Ord` sorts the same way the textual variant does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Synthetic theoretical-limit series.
    Amdahl,
    /// Sequential search.
    Original,
    /// Parallel breadth-first search.
    Pbfs,
}

impl Variant {
    /// Returns the serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Amdahl => "amdahl",
            Variant::Original => "original",
            Variant::Pbfs => "pbfs",
        }
    }

    /// Returns the category shown under a run of positions in a report.
    pub fn group_label(&self) -> &'static str {
        match self {
            Variant::Amdahl => "theoretical",
            Variant::Original => "sequential",
            Variant::Pbfs => "parallel",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "amdahl" => Ok(Variant::Amdahl),
            "original" => Ok(Variant::Original),
            "pbfs" => Ok(Variant::Pbfs),
            other => Err(RecordError::invalid_field(
                "variant",
                other,
                "expected one of amdahl, original, pbfs",
            )),
        }
    }
}

/// Identifies one benchmark configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConfigKey {
    /// Benchmarked algorithm.
    pub variant: Variant,
    /// Outer parallelism degree.
    pub t: u32,
    /// Inner partition count, absent for variants without partitioning.
    pub a: Option<u32>,
}

impl ConfigKey {
    /// Creates a key.
    pub const fn new(variant: Variant, t: u32, a: Option<u32>) -> Self {
        Self { variant, t, a }
    }

    /// The sequential single-thread configuration all speedups divide by.
    pub const fn baseline() -> Self {
        Self::new(Variant::Original, 1, None)
    }

    /// Parses a key from its three serialized fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use speedup_core::{ConfigKey, Variant};
    ///
    /// let key = ConfigKey::parse("pbfs", "2", "4").unwrap();
    /// assert_eq!(key, ConfigKey::new(Variant::Pbfs, 2, Some(4)));
    ///
    /// let key = ConfigKey::parse("original", "1", "None").unwrap();
    /// assert_eq!(key, ConfigKey::baseline());
    /// ```
    pub fn parse(variant: &str, t: &str, a: &str) -> Result<Self, RecordError> {
        Ok(Self {
            variant: variant.parse()?,
            t: parse_positive("t", t)?,
            a: parse_partitions(a)?,
        })
    }

    /// Returns the partition count as serialized, `None` when absent.
    pub fn a_field(&self) -> String {
        match self.a {
            Some(a) => a.to_string(),
            None => ABSENT.to_string(),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.variant, self.t, self.a_field())
    }
}

/// A single field of a [`ConfigKey`], used to select label rows and
/// categories in report layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyField {
    /// The variant name.
    Variant,
    /// The outer parallelism degree.
    T,
    /// The partition count.
    A,
}

impl KeyField {
    /// Returns the field value of `key` as a label, `None` when absent.
    pub fn label(&self, key: &ConfigKey) -> Option<String> {
        match self {
            KeyField::Variant => Some(key.variant.to_string()),
            KeyField::T => Some(key.t.to_string()),
            KeyField::A => key.a.map(|a| a.to_string()),
        }
    }
}

/// Parses a strictly positive integer field.
pub fn parse_positive(field: &'static str, raw: &str) -> Result<u32, RecordError> {
    let trimmed = raw.trim();
    match trimmed.parse::<u32>() {
        Ok(0) => Err(RecordError::invalid_field(field, trimmed, "must be positive")),
        Ok(value) => Ok(value),
        Err(_) => Err(RecordError::invalid_field(
            field,
            trimmed,
            "not a positive integer",
        )),
    }
}

/// Parses a partition count: the absence marker or a positive integer.
pub fn parse_partitions(raw: &str) -> Result<Option<u32>, RecordError> {
    let trimmed = raw.trim();
    if trimmed == ABSENT {
        Ok(None)
    } else {
        parse_positive("a", trimmed).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut keys = vec![
            ConfigKey::new(Variant::Pbfs, 2, Some(1)),
            ConfigKey::new(Variant::Original, 16, None),
            ConfigKey::new(Variant::Pbfs, 1, Some(16)),
            ConfigKey::new(Variant::Original, 2, None),
            ConfigKey::new(Variant::Pbfs, 1, Some(2)),
            ConfigKey::new(Variant::Amdahl, 1, Some(1)),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                ConfigKey::new(Variant::Amdahl, 1, Some(1)),
                ConfigKey::new(Variant::Original, 2, None),
                ConfigKey::new(Variant::Original, 16, None),
                ConfigKey::new(Variant::Pbfs, 1, Some(2)),
                ConfigKey::new(Variant::Pbfs, 1, Some(16)),
                ConfigKey::new(Variant::Pbfs, 2, Some(1)),
            ]
        );
    }

    #[test]
    fn test_absent_sorts_before_values() {
        let absent = ConfigKey::new(Variant::Pbfs, 1, None);
        let present = ConfigKey::new(Variant::Pbfs, 1, Some(1));
        assert!(absent < present);
        assert_ne!(absent, present);
    }

    #[test]
    fn test_parse_rejects_bad_fields() {
        assert!(ConfigKey::parse("serial", "1", "None").is_err());
        assert!(ConfigKey::parse("pbfs", "0", "1").is_err());
        assert!(ConfigKey::parse("pbfs", "-2", "1").is_err());
        assert!(ConfigKey::parse("pbfs", "2", "none").is_err());
        assert!(ConfigKey::parse("pbfs", "2", "0").is_err());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let key = ConfigKey::parse(" pbfs", "8 ", " 2\n").unwrap();
        assert_eq!(key, ConfigKey::new(Variant::Pbfs, 8, Some(2)));
    }

    #[test]
    fn test_display_and_a_field() {
        assert_eq!(ConfigKey::baseline().to_string(), "(original, 1, None)");
        assert_eq!(ConfigKey::baseline().a_field(), "None");
        assert_eq!(ConfigKey::new(Variant::Pbfs, 4, Some(8)).a_field(), "8");
    }

    #[test]
    fn test_key_field_labels() {
        let key = ConfigKey::new(Variant::Pbfs, 4, Some(2));
        assert_eq!(KeyField::Variant.label(&key).as_deref(), Some("pbfs"));
        assert_eq!(KeyField::T.label(&key).as_deref(), Some("4"));
        assert_eq!(KeyField::A.label(&key).as_deref(), Some("2"));
        assert_eq!(KeyField::A.label(&ConfigKey::baseline()), None);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&ConfigKey::baseline()).unwrap();
        assert_eq!(json, r#"{"variant":"original","t":1,"a":null}"#);
        let back: ConfigKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ConfigKey::baseline());
    }
}
