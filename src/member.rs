//! Canonical member records and the per-house member file format

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chamber of Parliament. Each house has an independent member roster
/// and party registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum House {
    Commons,
    Lords,
}

impl House {
    /// Identifier used in API queries and file names
    pub fn as_str(&self) -> &'static str {
        match self {
            House::Commons => "commons",
            House::Lords => "lords",
        }
    }

    /// Human label used in log messages ("MPs" / "Lords members")
    pub fn member_label(&self) -> &'static str {
        match self {
            House::Commons => "MPs",
            House::Lords => "Lords members",
        }
    }

    /// Display name for the synthetic all-members chart entry
    pub fn all_entry_name(&self) -> &'static str {
        match self {
            House::Commons => "All MPs",
            House::Lords => "All members",
        }
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for House {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commons" => Ok(House::Commons),
            "lords" => Ok(House::Lords),
            other => Err(format!("unknown house '{other}' (expected 'commons' or 'lords')")),
        }
    }
}

/// One member of a house, normalized from the raw API record.
///
/// Constituency fields are populated for Commons members only and are
/// omitted from JSON for Lords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub member_id: i64,
    pub gender: String,
    /// Display-formatted name
    pub name: String,
    /// None when the member has no party affiliation
    pub party_id: Option<i64>,
    /// Empty string when the member has no party affiliation
    pub party_name: String,
    /// None when the API lists no date of birth
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constituency_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constituency_name: Option<String>,
}

/// On-disk shape of the per-house member file: `{"members": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembersFile {
    pub members: Vec<Member>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn house_round_trips_through_str() {
        assert_eq!("commons".parse::<House>().unwrap(), House::Commons);
        assert_eq!("lords".parse::<House>().unwrap(), House::Lords);
        assert!("senate".parse::<House>().is_err());
        assert_eq!(House::Commons.to_string(), "commons");
    }

    #[test]
    fn lords_member_serializes_without_constituency_keys() {
        let member = Member {
            member_id: 100,
            gender: "F".into(),
            name: "Baroness Example".into(),
            party_id: Some(6),
            party_name: "Crossbench".into(),
            date_of_birth: None,
            constituency_id: None,
            constituency_name: None,
        };
        let json = serde_json::to_value(&member).unwrap();
        assert!(json.get("constituencyId").is_none());
        assert!(json.get("constituencyName").is_none());
        // Absent date of birth is an explicit null, not a missing key
        assert!(json.get("dateOfBirth").unwrap().is_null());
    }

    #[test]
    fn commons_member_serializes_with_constituency_keys() {
        let member = Member {
            member_id: 1,
            gender: "M".into(),
            name: "A Member".into(),
            party_id: Some(15),
            party_name: "Labour".into(),
            date_of_birth: Some(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()),
            constituency_id: Some(3541),
            constituency_name: Some("Somewhere West".into()),
        };
        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json["constituencyId"], 3541);
        assert_eq!(json["dateOfBirth"], "1970-01-01");
    }
}
