//! Age band generation and band-keyed histograms
//!
//! Bands are derived from an ordered list of lower bounds. The last bound
//! is a sentinel: it only caps the previous band and starts no band of its
//! own, so bounds `[18, 20, 30]` yield bands `18-19` and `20-29`.

use crate::{Error, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A closed integer age interval `[lower, upper]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub lower: u32,
    pub upper: u32,
}

impl Band {
    /// Histogram key for this band, e.g. `"20-29"`
    pub fn label(&self) -> String {
        format!("{}-{}", self.lower, self.upper)
    }

    pub fn contains(&self, age: u32) -> bool {
        age >= self.lower && age <= self.upper
    }
}

/// Derive contiguous, non-overlapping bands from strictly increasing
/// lower bounds. Requires at least two bounds.
pub fn bands_from_lower_bounds(bounds: &[u32]) -> Result<Vec<Band>> {
    if bounds.len() < 2 {
        return Err(Error::Config(format!(
            "age band bounds need at least 2 entries, got {}",
            bounds.len()
        )));
    }
    for pair in bounds.windows(2) {
        if pair[1] <= pair[0] {
            return Err(Error::Config(format!(
                "age band bounds must be strictly increasing ({} followed by {})",
                pair[0], pair[1]
            )));
        }
    }
    Ok(bounds
        .windows(2)
        .map(|pair| Band {
            lower: pair[0],
            upper: pair[1] - 1,
        })
        .collect())
}

/// Counts keyed by band label, kept and serialized in band order.
///
/// A plain JSON map type would reorder keys lexicographically, putting
/// "100-109" before "18-19"; this keeps insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Histogram {
    entries: Vec<(String, u64)>,
}

impl Histogram {
    /// The canonical empty histogram: every band label mapped to zero.
    /// All per-party and all-members counters start from this template
    /// so they share an identical key set.
    pub fn zeroed(bands: &[Band]) -> Self {
        Self {
            entries: bands.iter().map(|b| (b.label(), 0)).collect(),
        }
    }

    /// Increment the count for a label; unknown labels are ignored
    pub fn increment(&mut self, label: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| key == label) {
            entry.1 += 1;
        }
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, count)| *count)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(key, count)| (key.as_str(), *count))
    }
}

impl Serialize for Histogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Histogram {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct HistogramVisitor;

        impl<'de> Visitor<'de> for HistogramVisitor {
            type Value = Histogram;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of band label to count")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, count)) = access.next_entry::<String, u64>()? {
                    entries.push((key, count));
                }
                Ok(Histogram { entries })
            }
        }

        deserializer.deserialize_map(HistogramVisitor)
    }
}
