//! Student-facing ballot

use crate::types::{Candidate, Gender, RollNumberRule, Settings, VoteStatus};
use serde::{Deserialize, Serialize};

/// One candidate as shown to a student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotEntry {
    pub id: String,
    pub name: String,
    pub stream: String,
    pub division: String,
    /// Present only when the admin lets students see counts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotCategory {
    pub gender: Gender,
    pub already_voted: bool,
    pub entries: Vec<BallotEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub election_open: bool,
    pub roll_number_rule: RollNumberRule,
    pub categories: Vec<BallotCategory>,
    /// The voter has used every category
    pub complete: bool,
}

impl Ballot {
    pub fn category(&self, gender: Gender) -> Option<&BallotCategory> {
        self.categories.iter().find(|c| c.gender == gender)
    }
}

/// Build the ballot for one voter; a closed election shows no candidates
pub fn build_ballot(settings: &Settings, candidates: &[Candidate], status: &VoteStatus) -> Ballot {
    let categories = if settings.is_open() {
        Gender::ALL
            .iter()
            .map(|&gender| BallotCategory {
                gender,
                already_voted: status.has_voted(gender),
                entries: candidates
                    .iter()
                    .filter(|c| c.gender == gender)
                    .map(|c| BallotEntry {
                        id: c.id.clone(),
                        name: c.name.clone(),
                        stream: c.stream.clone(),
                        division: c.division.clone(),
                        votes: settings.show_vote_counts_to_students.then_some(c.votes),
                    })
                    .collect(),
            })
            .collect()
    } else {
        Vec::new()
    };

    Ballot {
        election_open: settings.is_open(),
        roll_number_rule: settings.roll_number_rule,
        categories,
        complete: status.is_complete(),
    }
}
