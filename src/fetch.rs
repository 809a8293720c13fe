//! HTTP client for the Members Names Information Service (MNIS)

use crate::member::House;
use crate::normalize::{OneOrMany, RawMember};
use crate::{Error, Result};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str =
    "http://data.parliament.uk/membersdataplatform/services/mnis/members/query";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Response envelope: `{"Members": {"Member": [...] | {...}}}`
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Members")]
    members: MembersNode,
}

#[derive(Debug, Deserialize)]
struct MembersNode {
    #[serde(rename = "Member")]
    member: OneOrMany<RawMember>,
}

/// Client for the members query endpoint
pub struct MnisClient {
    http: reqwest::Client,
    base_url: String,
}

impl MnisClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Fetch(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Query URL for all members of a house on a single date.
    ///
    /// Requests the Parties and HouseMemberships enrichments, plus
    /// Constituencies for the Commons. Date components are unpadded,
    /// matching what the API accepts.
    pub fn members_url(&self, house: House, date: NaiveDate) -> String {
        let day = format!("{}-{}-{}", date.year(), date.month(), date.day());
        let mut enrichments = vec!["Parties", "HouseMemberships"];
        if house == House::Commons {
            enrichments.push("Constituencies");
        }
        format!(
            "{base}/House={house}|Membership=all|{house}memberbetween={day}and{day}/{out}",
            base = self.base_url,
            house = house.as_str(),
            day = day,
            out = enrichments.join("|"),
        )
    }

    /// Fetch the raw member list for a house as of `date`.
    ///
    /// Any network failure or non-2xx status is fatal; there is no retry.
    pub async fn fetch_members(&self, house: House, date: NaiveDate) -> Result<Vec<RawMember>> {
        let url = self.members_url(house, date);
        debug!(house = %house, url = %url, "Querying members API");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::FetchStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        parse_members_envelope(&body)
    }
}

/// Unwrap the response envelope down to the raw member entries.
///
/// The API serves the body with a UTF-8 byte order mark, which
/// `serde_json` rejects; it is stripped before parsing. A house with a
/// single member would arrive as a bare object rather than a list.
pub fn parse_members_envelope(body: &str) -> Result<Vec<RawMember>> {
    let body = body.trim_start_matches('\u{feff}');
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("members API payload: {e}")))?;
    Ok(envelope.members.member.into_vec())
}
