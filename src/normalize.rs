//! Normalization of raw MNIS member records
//!
//! The API speaks XML-as-JSON: attributes become `@`-prefixed keys, text
//! nodes become `#text`, and "no value" is an explicit `{"@xsi:nil": "true"}`
//! object rather than an absent key. A field holding one value may be a bare
//! object while the same field holding several is a list. Both conventions
//! are normalized here, at the parse boundary, so nothing downstream ever
//! sees them.

use crate::member::{House, Member};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::Deserialize;

/// A value that is either present or an explicit xsi:nil marker
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MaybeNil {
    Text(String),
    Flagged {
        #[serde(rename = "@xsi:nil")]
        nil: String,
        #[serde(rename = "#text", default)]
        text: Option<String>,
    },
}

impl MaybeNil {
    /// True only when the nil flag is present and set
    pub fn is_nil(&self) -> bool {
        matches!(self, MaybeNil::Flagged { nil, .. } if nil == "true")
    }

    /// Collapse into a plain optional string. A flag of "false" still
    /// counts as a value if a text node accompanies it.
    pub fn into_option(self) -> Option<String> {
        match self {
            MaybeNil::Text(text) => Some(text),
            MaybeNil::Flagged { nil, text } => {
                if nil == "true" {
                    None
                } else {
                    text
                }
            }
        }
    }
}

/// A field the API serializes as either one object or a list of them
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// One `Member` entry from the API envelope, as delivered
#[derive(Debug, Clone, Deserialize)]
pub struct RawMember {
    #[serde(rename = "@Member_Id")]
    pub member_id: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "DisplayAs")]
    pub name: String,
    /// Null or an empty string for members with no party affiliation
    #[serde(rename = "Party", default)]
    pub party: Option<RawPartyValue>,
    #[serde(rename = "DateOfBirth")]
    pub date_of_birth: MaybeNil,
    /// Present only when the Constituencies enrichment was requested
    #[serde(rename = "Constituencies", default)]
    pub constituencies: Option<RawConstituencies>,
}

/// The Party field as delivered: an id/text object for affiliated
/// members, but an empty string (not just null) for unaffiliated ones
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPartyValue {
    Party(RawParty),
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawParty {
    #[serde(rename = "@Id")]
    pub id: String,
    #[serde(rename = "#text")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawConstituencies {
    #[serde(rename = "Constituency")]
    pub constituency: OneOrMany<RawConstituency>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawConstituency {
    #[serde(rename = "@Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    /// Nil-flagged when the membership is still open (the current one)
    #[serde(rename = "EndDate", default)]
    pub end_date: Option<MaybeNil>,
}

/// Convert one raw API record into a canonical `Member`.
///
/// Pure transformation: no I/O, no hidden state.
pub fn normalize_member(raw: RawMember, house: House) -> Result<Member> {
    let member_id = parse_id(&raw.member_id, "@Member_Id")?;

    let (party_id, party_name) = match raw.party {
        Some(RawPartyValue::Party(party)) => {
            (Some(parse_id(&party.id, "Party @Id")?), party.name)
        }
        Some(RawPartyValue::Text(text)) if text.is_empty() => (None, String::new()),
        Some(RawPartyValue::Text(text)) => {
            return Err(Error::Parse(format!(
                "member {member_id} has a bare Party value '{text}'"
            )));
        }
        None => (None, String::new()),
    };

    // The raw value is a timestamp like "1960-09-15T00:00:00"; only the
    // date part is kept.
    let date_of_birth = match raw.date_of_birth.into_option() {
        Some(timestamp) => Some(parse_date_prefix(&timestamp)?),
        None => None,
    };

    let (constituency_id, constituency_name) = if house == House::Commons {
        let history = raw
            .constituencies
            .ok_or_else(|| Error::Parse(format!("member {member_id} has no Constituencies field")))?;
        let current = resolve_current_constituency(history, member_id)?;
        (
            Some(parse_id(&current.id, "Constituency @Id")?),
            Some(current.name),
        )
    } else {
        (None, None)
    };

    Ok(Member {
        member_id,
        gender: raw.gender,
        name: raw.name,
        party_id,
        party_name,
        date_of_birth,
        constituency_id,
        constituency_name,
    })
}

/// Pick the member's current constituency out of their membership history.
///
/// A lone object means the member has only ever held one seat; it is used
/// as-is. A list is scanned for the entry whose end date is still open
/// (nil-flagged) and a list with no open entry is a data error.
fn resolve_current_constituency(
    history: RawConstituencies,
    member_id: i64,
) -> Result<RawConstituency> {
    match history.constituency {
        OneOrMany::One(constituency) => Ok(constituency),
        OneOrMany::Many(entries) => entries
            .into_iter()
            .find(|entry| entry.end_date.as_ref().is_some_and(MaybeNil::is_nil))
            .ok_or(Error::Resolution { member_id }),
    }
}

fn parse_id(raw: &str, field: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| Error::Parse(format!("{field} '{raw}' is not an integer")))
}

fn parse_date_prefix(timestamp: &str) -> Result<NaiveDate> {
    let date_part = timestamp
        .get(..10)
        .ok_or_else(|| Error::Parse(format!("date '{timestamp}' is too short")))?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| Error::Parse(format!("invalid date '{timestamp}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_commons_member() -> RawMember {
        serde_json::from_value(serde_json::json!({
            "@Member_Id": "1423",
            "Gender": "F",
            "DisplayAs": "Ms Example MP",
            "Party": { "@Id": "15", "#text": "Labour" },
            "DateOfBirth": "1960-09-15T00:00:00",
            "Constituencies": {
                "Constituency": [
                    { "@Id": "1", "Name": "Old Seat", "EndDate": "2015-03-30T00:00:00" },
                    { "@Id": "2", "Name": "Current Seat", "EndDate": { "@xsi:nil": "true" } }
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn normalizes_commons_member() {
        let member = normalize_member(raw_commons_member(), House::Commons).unwrap();
        assert_eq!(member.member_id, 1423);
        assert_eq!(member.party_id, Some(15));
        assert_eq!(member.party_name, "Labour");
        assert_eq!(
            member.date_of_birth,
            Some(NaiveDate::from_ymd_opt(1960, 9, 15).unwrap())
        );
        assert_eq!(member.constituency_id, Some(2));
        assert_eq!(member.constituency_name.as_deref(), Some("Current Seat"));
    }

    #[test]
    fn normalization_is_idempotent() {
        let raw = raw_commons_member();
        let first = normalize_member(raw.clone(), House::Commons).unwrap();
        let second = normalize_member(raw, House::Commons).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn nil_flagged_birth_date_becomes_none() {
        let mut raw = raw_commons_member();
        raw.date_of_birth =
            serde_json::from_value(serde_json::json!({ "@xsi:nil": "true" })).unwrap();
        let member = normalize_member(raw, House::Commons).unwrap();
        assert_eq!(member.date_of_birth, None);
    }

    #[test]
    fn false_nil_flag_keeps_the_text_value() {
        let value: MaybeNil = serde_json::from_value(serde_json::json!({
            "@xsi:nil": "false",
            "#text": "1955-04-02T00:00:00"
        }))
        .unwrap();
        assert!(!value.is_nil());
        assert_eq!(value.into_option().as_deref(), Some("1955-04-02T00:00:00"));
    }

    #[test]
    fn missing_party_yields_null_id_and_empty_name() {
        let raw: RawMember = serde_json::from_value(serde_json::json!({
            "@Member_Id": "7",
            "Gender": "M",
            "DisplayAs": "Lord Example",
            "Party": null,
            "DateOfBirth": "1950-01-31T00:00:00"
        }))
        .unwrap();
        let member = normalize_member(raw, House::Lords).unwrap();
        assert_eq!(member.party_id, None);
        assert_eq!(member.party_name, "");
        assert_eq!(member.constituency_id, None);
        assert_eq!(member.constituency_name, None);
    }

    #[test]
    fn empty_party_string_also_means_no_party() {
        let raw: RawMember = serde_json::from_value(serde_json::json!({
            "@Member_Id": "8",
            "Gender": "F",
            "DisplayAs": "Baroness Example",
            "Party": "",
            "DateOfBirth": "1950-01-31T00:00:00"
        }))
        .unwrap();
        let member = normalize_member(raw, House::Lords).unwrap();
        assert_eq!(member.party_id, None);
        assert_eq!(member.party_name, "");
    }

    #[test]
    fn non_empty_bare_party_string_is_a_parse_error() {
        let raw: RawMember = serde_json::from_value(serde_json::json!({
            "@Member_Id": "8",
            "Gender": "F",
            "DisplayAs": "Baroness Example",
            "Party": "Crossbench",
            "DateOfBirth": "1950-01-31T00:00:00"
        }))
        .unwrap();
        assert!(matches!(
            normalize_member(raw, House::Lords),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn single_constituency_object_is_used_without_end_date_check() {
        let raw: RawMember = serde_json::from_value(serde_json::json!({
            "@Member_Id": "9",
            "Gender": "M",
            "DisplayAs": "New Member MP",
            "Party": { "@Id": "4", "#text": "Conservative" },
            "DateOfBirth": "1980-06-01T00:00:00",
            "Constituencies": {
                "Constituency": {
                    "@Id": "77", "Name": "Only Seat", "EndDate": "2020-01-01T00:00:00"
                }
            }
        }))
        .unwrap();
        let member = normalize_member(raw, House::Commons).unwrap();
        assert_eq!(member.constituency_id, Some(77));
    }

    #[test]
    fn list_with_no_open_constituency_is_a_resolution_error() {
        let raw: RawMember = serde_json::from_value(serde_json::json!({
            "@Member_Id": "9",
            "Gender": "M",
            "DisplayAs": "Mystery MP",
            "Party": { "@Id": "4", "#text": "Conservative" },
            "DateOfBirth": "1980-06-01T00:00:00",
            "Constituencies": {
                "Constituency": [
                    { "@Id": "1", "Name": "Old", "EndDate": "2010-05-06T00:00:00" },
                    { "@Id": "2", "Name": "Older", "EndDate": "2005-05-05T00:00:00" }
                ]
            }
        }))
        .unwrap();
        match normalize_member(raw, House::Commons) {
            Err(Error::Resolution { member_id }) => assert_eq!(member_id, 9),
            other => panic!("expected Resolution error, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_ids_are_parse_errors() {
        let mut raw = raw_commons_member();
        raw.member_id = "not-a-number".into();
        assert!(matches!(
            normalize_member(raw, House::Commons),
            Err(Error::Parse(_))
        ));
    }
}
