//! # Core Types for the Class Representative Election Service
//!
//! This module defines the records persisted by the [`crate::store`] layer
//! and the typed requests/responses exchanged with the election service.
//!
//! ## Persisted Records
//! - [`Candidate`]: a person standing for one gender category, with a vote counter
//! - [`VoteRecord`]: one identified vote, keyed by roll number and gender category
//! - [`Settings`]: the election singleton (open/closed, roll number rule, count visibility)
//!
//! ## Closed Enumerations
//! - [`Gender`]: the category partition (`Boy` / `Girl`)
//! - [`ElectionStatus`]: `Open` / `Closed`
//! - [`RollNumberRule`]: `Mandatory` / `Optional` / `Disabled`
//!
//! All enumerations parse from their variant names via [`std::str::FromStr`]
//! and reject anything else with a validation error.
//!
//! ## Usage Examples
//!
//! ```rust
//! use cr_election::types::*;
//!
//! let settings = Settings::from_json(
//!     r#"{"election_status":"Open","roll_number_rule":"Optional","show_vote_counts_to_students":false}"#,
//! ).unwrap();
//! assert!(settings.is_open());
//!
//! let request = CandidateCreate::new("Asha Rao", "Science", "A", Gender::Girl);
//! assert!(request.validate().is_ok());
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Gender category that candidates and identified votes are partitioned into
///
/// Every voter may cast at most one identified vote per category. The set is
/// closed: persisted values other than the variant names fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    Boy,
    Girl,
}

impl Gender {
    /// Every category, in display order
    pub const ALL: [Gender; 2] = [Gender::Boy, Gender::Girl];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Boy => "Boy",
            Gender::Girl => "Girl",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Boy" => Ok(Gender::Boy),
            "Girl" => Ok(Gender::Girl),
            other => Err(Error::validation(
                "gender",
                format!("expected one of Boy, Girl; got {other:?}"),
            )),
        }
    }
}

/// Whether the election currently accepts votes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElectionStatus {
    Open,
    Closed,
}

impl FromStr for ElectionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Open" => Ok(ElectionStatus::Open),
            "Closed" => Ok(ElectionStatus::Closed),
            other => Err(Error::validation(
                "election_status",
                format!("expected one of Open, Closed; got {other:?}"),
            )),
        }
    }
}

/// How roll numbers are treated when a vote is cast
///
/// - `Mandatory`: a non-empty roll number is required for every vote
/// - `Optional`: roll numbers are accepted; votes without one are anonymous
/// - `Disabled`: the ballot does not ask for one (the presentation layer
///   stops collecting it; the engine still honours one if supplied)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollNumberRule {
    Mandatory,
    Optional,
    Disabled,
}

impl FromStr for RollNumberRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Mandatory" => Ok(RollNumberRule::Mandatory),
            "Optional" => Ok(RollNumberRule::Optional),
            "Disabled" => Ok(RollNumberRule::Disabled),
            other => Err(Error::validation(
                "roll_number_rule",
                format!("expected one of Mandatory, Optional, Disabled; got {other:?}"),
            )),
        }
    }
}

/// Election settings singleton
///
/// Read before every vote attempt and replaced wholesale by the admin; there
/// are no partial-field updates.
///
/// # Defaults
///
/// A never-written settings document starts as closed, with optional roll
/// numbers and vote counts hidden from students:
///
/// ```rust
/// use cr_election::types::{ElectionStatus, RollNumberRule, Settings};
///
/// let settings = Settings::default();
/// assert_eq!(settings.election_status, ElectionStatus::Closed);
/// assert_eq!(settings.roll_number_rule, RollNumberRule::Optional);
/// assert!(!settings.show_vote_counts_to_students);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub election_status: ElectionStatus,
    pub roll_number_rule: RollNumberRule,
    pub show_vote_counts_to_students: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            election_status: ElectionStatus::Closed,
            roll_number_rule: RollNumberRule::Optional,
            show_vote_counts_to_students: false,
        }
    }
}

impl Settings {
    /// Parse a settings document received from outside the crate
    ///
    /// Any shape or enumeration mismatch is reported as a validation error
    /// rather than a serialization error, since the input came from a caller.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::validation("settings", e.to_string()))
    }

    pub fn is_open(&self) -> bool {
        self.election_status == ElectionStatus::Open
    }
}

/// Admin request to create a candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateCreate {
    pub name: String,
    pub stream: String,
    pub division: String,
    pub gender: Gender,
}

impl CandidateCreate {
    pub fn new(
        name: impl Into<String>,
        stream: impl Into<String>,
        division: impl Into<String>,
        gender: Gender,
    ) -> Self {
        Self {
            name: name.into(),
            stream: stream.into(),
            division: division.into(),
            gender,
        }
    }

    /// Check that every text field is non-empty after trimming
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("stream", &self.stream),
            ("division", &self.division),
        ] {
            if value.trim().is_empty() {
                return Err(Error::validation(field, "must not be empty"));
            }
        }
        Ok(())
    }
}

/// A candidate standing for one gender category
///
/// `votes` is only ever changed by the voting rule engine and, being a `u64`,
/// can never go negative. `id` is allocated once at creation and never
/// rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub stream: String,
    pub division: String,
    pub gender: Gender,
    pub votes: u64,
}

impl Candidate {
    /// Build a fresh candidate with zero votes from a validated request
    pub fn from_request(id: impl Into<String>, request: CandidateCreate) -> Self {
        Self {
            id: id.into(),
            name: request.name.trim().to_string(),
            stream: request.stream.trim().to_string(),
            division: request.division.trim().to_string(),
            gender: request.gender,
            votes: 0,
        }
    }
}

/// One identified vote in the voting history
///
/// Anonymous votes leave no record. `voted_for` is the gender category, not a
/// particular candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteRecord {
    pub roll_no: String,
    pub voted_for: Gender,
}

/// Trim a roll number and treat an empty result as absent
///
/// ```rust
/// use cr_election::types::normalize_roll_no;
///
/// assert_eq!(normalize_roll_no(Some("  S1 ")), Some("S1".to_string()));
/// assert_eq!(normalize_roll_no(Some("   ")), None);
/// assert_eq!(normalize_roll_no(None), None);
/// ```
pub fn normalize_roll_no(roll_no: Option<&str>) -> Option<String> {
    roll_no
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
}

/// A vote attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRequest {
    pub candidate_id: String,
    #[serde(default, rename = "student_roll_no")]
    pub roll_no: Option<String>,
}

impl VoteRequest {
    /// An anonymous vote
    pub fn anonymous(candidate_id: impl Into<String>) -> Self {
        Self {
            candidate_id: candidate_id.into(),
            roll_no: None,
        }
    }

    /// A vote identified by roll number
    pub fn identified(candidate_id: impl Into<String>, roll_no: impl Into<String>) -> Self {
        Self {
            candidate_id: candidate_id.into(),
            roll_no: Some(roll_no.into()),
        }
    }

    /// The roll number after normalization
    pub fn normalized_roll_no(&self) -> Option<String> {
        normalize_roll_no(self.roll_no.as_deref())
    }
}

/// Per-category voting status for one roll number
///
/// Serializes as a flat map, e.g. `{"Boy": true, "Girl": false}`. Every
/// category is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteStatus(BTreeMap<Gender, bool>);

impl VoteStatus {
    /// Status with no category voted
    pub fn empty() -> Self {
        Self(Gender::ALL.iter().map(|g| (*g, false)).collect())
    }

    pub(crate) fn mark(&mut self, gender: Gender) {
        self.0.insert(gender, true);
    }

    pub fn has_voted(&self, gender: Gender) -> bool {
        self.0.get(&gender).copied().unwrap_or(false)
    }

    /// True once every category has been voted in
    pub fn is_complete(&self) -> bool {
        Gender::ALL.iter().all(|g| self.has_voted(*g))
    }

    pub fn categories(&self) -> &BTreeMap<Gender, bool> {
        &self.0
    }
}

impl Default for VoteStatus {
    fn default() -> Self {
        Self::empty()
    }
}

/// Turnout figures for the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoterStats {
    /// Distinct roll numbers in the voting history
    pub unique_voter_count: usize,
    /// Sum of every candidate's votes, anonymous votes included
    pub total_vote_count: u64,
}
