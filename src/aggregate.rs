//! Per-house age aggregation
//!
//! Turns a list of normalized members into one histogram per registered
//! party plus an all-members histogram. Members without a birth date,
//! members of unregistered parties, and ages outside every configured
//! band are skipped without error.

use crate::bands::{Band, Histogram};
use crate::member::Member;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One registry entry: a party worth a separate breakdown
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PartyDef {
    pub id: i64,
    pub name: String,
}

/// One entry in the chart output: a party (or the synthetic "all" entry)
/// with its age histogram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyEntry {
    pub id: String,
    pub name: String,
    pub ages: Histogram,
}

/// Aggregated ages for one house
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseAges {
    /// Per-party entries, in registry order
    pub parties: Vec<PartyEntry>,
    /// Every counted member of the house regardless of party
    pub all: Histogram,
}

/// Exact calendar age on `today`: the year difference, minus one if the
/// birthday has not yet been reached this year. A birthday falling on
/// `today` counts as reached.
pub fn age_on(today: NaiveDate, birth: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Count members into per-party and all-members histograms.
///
/// A member whose party is not in the registry is excluded from every
/// histogram, including the all-members one, so that "all" always means
/// "all counted members".
pub fn aggregate_house(
    members: &[Member],
    registry: &[PartyDef],
    bands: &[Band],
    today: NaiveDate,
) -> HouseAges {
    let mut parties: Vec<PartyEntry> = registry
        .iter()
        .map(|party| PartyEntry {
            id: party.id.to_string(),
            name: party.name.clone(),
            ages: Histogram::zeroed(bands),
        })
        .collect();
    let mut all = Histogram::zeroed(bands);

    for member in members {
        let Some(birth) = member.date_of_birth else {
            // Age indeterminate
            continue;
        };
        let Some(party_id) = member.party_id else {
            continue;
        };
        let Some(entry) = parties.iter_mut().find(|p| p.id == party_id.to_string()) else {
            // Unregistered party: too few members to be meaningful
            continue;
        };

        let age = age_on(today, birth);
        if age < 0 {
            continue;
        }
        // First matching band wins; bands are non-overlapping and scanned
        // in ascending order.
        if let Some(band) = bands.iter().find(|band| band.contains(age as u32)) {
            let label = band.label();
            entry.ages.increment(&label);
            all.increment(&label);
        }
    }

    HouseAges { parties, all }
}
