//! JSON wire types exchanged with the terms service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A terms and conditions document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    pub revision: i64,
    #[serde(rename = "created-on", default, with = "rfc3339")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub content: String,
}

/// Request body for creating a new term revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveTerm {
    pub content: String,
}

/// Response carrying the id of a saved or published term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermIdResponse {
    #[serde(rename = "term-id")]
    pub term_id: String,
}

/// A user's agreement to a term revision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agreement {
    pub user: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner: String,
    pub term: String,
    pub revision: i64,
    #[serde(rename = "created-on", default, with = "rfc3339")]
    pub created_on: Option<DateTime<Utc>>,
}

/// A single agreement to record. The revision must always be specified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveAgreement {
    #[serde(rename = "termowner", default, skip_serializing_if = "String::is_empty")]
    pub term_owner: String,
    #[serde(rename = "termname")]
    pub term_name: String,
    #[serde(rename = "termrevision")]
    pub term_revision: i64,
}

/// Request body for recording agreements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveAgreements {
    pub agreements: Vec<SaveAgreement>,
}

/// Agreements recorded by a save request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveAgreementResponses {
    #[serde(default)]
    pub agreements: Vec<Agreement>,
}

/// Terms to check for missing agreements, as `owner/name/revision` ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckAgreementsRequest {
    pub terms: Vec<String>,
}

/// A term the user has not agreed to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTermsResponse {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    pub revision: i64,
    #[serde(rename = "created-on", default, with = "rfc3339")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub content: String,
}

/// Error body of a failed request. Services populate one field or the other.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
}

impl ErrorResponse {
    pub(crate) fn into_text(self) -> String {
        if self.error.is_empty() {
            self.message
        } else {
            self.error
        }
    }
}

/// RFC 3339 timestamps at second precision.
///
/// An unset timestamp is written as the zero time `0001-01-01T00:00:00Z`
/// and read back as `None`.
mod rfc3339 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const ZERO_TIME: &str = "0001-01-01T00:00:00Z";

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(t) => serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => serializer.serialize_str(ZERO_TIME),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s.as_deref() {
            None | Some("") | Some(ZERO_TIME) => Ok(None),
            Some(s) => DateTime::parse_from_rfc3339(s)
                .map(|t| Some(t.with_timezone(&Utc)))
                .map_err(serde::de::Error::custom),
        }
    }
}
