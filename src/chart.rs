//! Chart document assembly
//!
//! Merges the two per-house aggregations with the reference UK population
//! histogram into the single JSON document the chart front end consumes.
//! Every entry, in both houses, keys its histogram as `ages`.

use crate::aggregate::{HouseAges, PartyEntry};
use crate::bands::Histogram;
use crate::member::House;
use serde::{Deserialize, Serialize};

pub const UK_POPULATION_NAME: &str = "UK adult population";

/// The reference population entry at the top of the chart document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UkEntry {
    pub name: String,
    pub ages: Histogram,
}

/// The complete chart document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDocument {
    pub uk: UkEntry,
    pub commons: Vec<PartyEntry>,
    pub lords: Vec<PartyEntry>,
}

/// Assemble the chart document from both houses' aggregations and the
/// reference population histogram.
pub fn build_chart(commons: HouseAges, lords: HouseAges, uk_population: Histogram) -> ChartDocument {
    ChartDocument {
        uk: UkEntry {
            name: UK_POPULATION_NAME.to_string(),
            ages: uk_population,
        },
        commons: with_all_entry(commons, House::Commons),
        lords: with_all_entry(lords, House::Lords),
    }
}

/// Party entries in registry order, with the synthetic "all" entry in front
fn with_all_entry(house_ages: HouseAges, house: House) -> Vec<PartyEntry> {
    let mut entries = Vec::with_capacity(house_ages.parties.len() + 1);
    entries.push(PartyEntry {
        id: "all".to_string(),
        name: house.all_entry_name().to_string(),
        ages: house_ages.all,
    });
    entries.extend(house_ages.parties);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate_house, PartyDef};
    use crate::bands::bands_from_lower_bounds;
    use crate::member::Member;
    use chrono::NaiveDate;

    fn sample_house(bands_lower: &[u32]) -> HouseAges {
        let bands = bands_from_lower_bounds(bands_lower).unwrap();
        let registry = vec![PartyDef { id: 15, name: "Labour".into() }];
        let members = [Member {
            member_id: 1,
            gender: "M".into(),
            name: "A Member".into(),
            party_id: Some(15),
            party_name: "Labour".into(),
            date_of_birth: Some(NaiveDate::from_ymd_opt(1980, 1, 1).unwrap()),
            constituency_id: None,
            constituency_name: None,
        }];
        aggregate_house(
            &members,
            &registry,
            &bands,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        )
    }

    #[test]
    fn all_entry_is_prepended_with_house_specific_name() {
        let bands_lower = [18, 20, 30, 40, 50];
        let chart = build_chart(
            sample_house(&bands_lower),
            sample_house(&bands_lower),
            Histogram::default(),
        );

        assert_eq!(chart.commons[0].id, "all");
        assert_eq!(chart.commons[0].name, "All MPs");
        assert_eq!(chart.lords[0].id, "all");
        assert_eq!(chart.lords[0].name, "All members");
        assert_eq!(chart.commons.len(), 2);
        assert_eq!(chart.commons[1].id, "15");
    }

    #[test]
    fn every_entry_serializes_under_the_ages_key() {
        let bands_lower = [18, 20, 30, 40, 50];
        let chart = build_chart(
            sample_house(&bands_lower),
            sample_house(&bands_lower),
            Histogram::default(),
        );
        let json = serde_json::to_value(&chart).unwrap();

        for house_key in ["commons", "lords"] {
            for entry in json[house_key].as_array().unwrap() {
                assert!(entry.get("ages").is_some(), "{house_key} entry missing 'ages'");
                assert!(entry.get("bands").is_none());
                assert!(entry.get("bages").is_none());
            }
        }
        assert_eq!(json["uk"]["name"], UK_POPULATION_NAME);
    }

    #[test]
    fn uk_population_passes_through_verbatim() {
        let uk: Histogram = serde_json::from_str(r#"{"18-19": 1500, "20-29": 8000}"#).unwrap();
        let bands_lower = [18, 20, 30];
        let chart = build_chart(sample_house(&bands_lower), sample_house(&bands_lower), uk);
        assert_eq!(chart.uk.ages.get("20-29"), Some(8000));
    }
}
