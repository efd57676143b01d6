//! Tallies, winners and turnout
//!
//! Winners are computed per gender category. A category whose best count is
//! zero has no winners at all, so an untouched election never reports every
//! candidate as tied. Ties are reported through [`CategoryWinners::tie`] and
//! never broken.

use crate::types::{Candidate, Gender, VoteRecord, VoterStats, normalize_roll_no};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Winner set for one gender category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWinners {
    pub gender: Gender,
    /// Highest vote count in the category (0 when nobody has votes)
    pub top_votes: u64,
    /// Every candidate at `top_votes`, in candidate-list order; empty when `top_votes` is 0
    pub winners: Vec<Candidate>,
    /// More than one winner
    pub tie: bool,
}

impl CategoryWinners {
    fn empty(gender: Gender) -> Self {
        Self {
            gender,
            top_votes: 0,
            winners: Vec::new(),
            tie: false,
        }
    }

    /// True while no candidate in the category has a vote
    pub fn is_undecided(&self) -> bool {
        self.winners.is_empty()
    }
}

/// Winner sets for every gender category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Winners(BTreeMap<Gender, CategoryWinners>);

impl Winners {
    pub fn get(&self, gender: Gender) -> Option<&CategoryWinners> {
        self.0.get(&gender)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryWinners> {
        self.0.values()
    }

    /// True if any category ended in a tie
    pub fn has_tie(&self) -> bool {
        self.iter().any(|c| c.tie)
    }
}

/// Compute the per-category winner sets from a vote snapshot
pub fn compute_winners(candidates: &[Candidate]) -> Winners {
    let categories = Gender::ALL
        .iter()
        .map(|&gender| (gender, category_winners(candidates, gender)))
        .collect();
    Winners(categories)
}

fn category_winners(candidates: &[Candidate], gender: Gender) -> CategoryWinners {
    let in_category = move || candidates.iter().filter(move |c| c.gender == gender);

    let top_votes = in_category().map(|c| c.votes).max().unwrap_or(0);
    if top_votes == 0 {
        return CategoryWinners::empty(gender);
    }

    let winners: Vec<Candidate> = in_category()
        .filter(|c| c.votes == top_votes)
        .cloned()
        .collect();
    let tie = winners.len() > 1;

    CategoryWinners {
        gender,
        top_votes,
        winners,
        tie,
    }
}

/// Distinct identified voters and total votes cast
///
/// Roll numbers are normalized before counting; blank legacy entries are
/// ignored. The total includes anonymous votes, which only exist as
/// candidate counts.
pub fn voter_stats(history: &[VoteRecord], candidates: &[Candidate]) -> VoterStats {
    let unique_voters: HashSet<String> = history
        .iter()
        .filter_map(|r| normalize_roll_no(Some(&r.roll_no)))
        .collect();

    VoterStats {
        unique_voter_count: unique_voters.len(),
        total_vote_count: candidates.iter().map(|c| c.votes).sum(),
    }
}

/// Standings for one category on the admin results board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStanding {
    pub gender: Gender,
    /// Candidates by descending votes; equal counts keep list order
    pub candidates: Vec<Candidate>,
    pub winners: CategoryWinners,
}

/// Full results snapshot for the admin dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionResults {
    pub generated_at: DateTime<Utc>,
    pub categories: Vec<CategoryStanding>,
    pub stats: VoterStats,
}

impl ElectionResults {
    pub fn category(&self, gender: Gender) -> Option<&CategoryStanding> {
        self.categories.iter().find(|c| c.gender == gender)
    }
}

/// Build the results board from candidate and history snapshots
pub fn compile_results(candidates: &[Candidate], history: &[VoteRecord]) -> ElectionResults {
    let mut winners = compute_winners(candidates).0;

    let categories = Gender::ALL
        .iter()
        .map(|&gender| {
            let mut standing: Vec<Candidate> = candidates
                .iter()
                .filter(|c| c.gender == gender)
                .cloned()
                .collect();
            // sort_by is stable
            standing.sort_by(|a, b| b.votes.cmp(&a.votes));

            CategoryStanding {
                gender,
                candidates: standing,
                winners: winners
                    .remove(&gender)
                    .unwrap_or_else(|| CategoryWinners::empty(gender)),
            }
        })
        .collect();

    ElectionResults {
        generated_at: Utc::now(),
        categories,
        stats: voter_stats(history, candidates),
    }
}
