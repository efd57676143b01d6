//! Voting rule engine
//!
//! Decides whether a vote attempt is accepted and, if so, applies it:
//! 1. The election must be open
//! 2. A roll number is required when the rule is `Mandatory`
//! 3. The candidate must exist
//! 4. An identified voter may vote once per gender category
//!
//! The first failing check wins. Checking never touches the store; only an
//! accepted vote is written, history first and vote counts second.

use crate::errors::RejectionKind;
use crate::store::{Collection, RecordStore, RecordStoreExt};
use crate::types::{
    Candidate, Gender, RollNumberRule, Settings, VoteRecord, VoteRequest, VoteStatus,
    normalize_roll_no,
};
use crate::{Error, Result, rejection};

/// A vote that passed every rule check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedVote {
    /// Position of the chosen candidate in the candidate list
    pub candidate_index: usize,
    /// History entry to append, `None` for anonymous votes
    pub record: Option<VoteRecord>,
}

/// Run the rule checks against a snapshot of settings, candidates and history
pub fn check_vote(
    settings: &Settings,
    candidates: &[Candidate],
    history: &[VoteRecord],
    request: &VoteRequest,
) -> Result<AcceptedVote> {
    if !settings.is_open() {
        return Err(rejection!(
            RejectionKind::ElectionClosed,
            "Voting is currently closed by the admin."
        ));
    }

    let roll_no = request.normalized_roll_no();

    if settings.roll_number_rule == RollNumberRule::Mandatory && roll_no.is_none() {
        return Err(rejection!(
            RejectionKind::RollNumberRequired,
            "Roll number is mandatory for voting."
        ));
    }

    let candidate_index = candidates
        .iter()
        .position(|c| c.id == request.candidate_id)
        .ok_or_else(|| {
            rejection!(
                RejectionKind::CandidateNotFound,
                "Candidate not found: {}",
                request.candidate_id
            )
        })?;
    let gender = candidates[candidate_index].gender;

    let record = match roll_no {
        Some(roll_no) => {
            if has_voted_for(history, &roll_no, gender) {
                return Err(rejection!(
                    RejectionKind::AlreadyVoted,
                    "Roll number {} has already voted for a {} CR.",
                    roll_no,
                    gender
                ));
            }
            Some(VoteRecord {
                roll_no,
                voted_for: gender,
            })
        }
        None => None,
    };

    Ok(AcceptedVote {
        candidate_index,
        record,
    })
}

/// Persist an accepted vote and return the updated candidate
///
/// The history document is saved before the candidate list. If the second
/// write fails the voter is recorded without the matching increment; that
/// window is tolerated and not reconciled.
pub fn record_vote<S>(
    store: &S,
    candidates: &mut [Candidate],
    history: &mut Vec<VoteRecord>,
    accepted: AcceptedVote,
) -> Result<Candidate>
where
    S: RecordStore + ?Sized,
{
    let candidate = candidates
        .get_mut(accepted.candidate_index)
        .ok_or_else(|| Error::internal("Accepted vote points outside the candidate list"))?;
    let votes = candidate
        .votes
        .checked_add(1)
        .ok_or_else(|| Error::internal("Vote counter overflow"))?;

    if let Some(record) = accepted.record {
        history.push(record);
        store.save(Collection::VotingHistory, &*history)?;
    }

    candidate.votes = votes;
    let updated = candidate.clone();
    store.save(Collection::Candidates, &*candidates)?;

    Ok(updated)
}

/// Which categories a roll number has already voted in
pub fn vote_status(history: &[VoteRecord], roll_no: &str) -> VoteStatus {
    let mut status = VoteStatus::empty();
    if let Some(roll_no) = normalize_roll_no(Some(roll_no)) {
        for record in history.iter().filter(|r| r.roll_no.trim() == roll_no) {
            status.mark(record.voted_for);
        }
    }
    status
}

fn has_voted_for(history: &[VoteRecord], roll_no: &str, gender: Gender) -> bool {
    history
        .iter()
        .any(|r| r.voted_for == gender && r.roll_no.trim() == roll_no)
}
