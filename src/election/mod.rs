//! Election service: the operations exposed to a transport layer
//!
//! Every operation runs under one service-wide mutex, so each
//! read-modify-write cycle against the record store is serialized. Two
//! concurrent votes can no longer both read `votes = N` and both write
//! `N + 1`, and a roll number cannot slip past the uniqueness check twice.

pub mod ballot;
pub mod tally;
pub mod voting;

use crate::config::StorageConfig;
use crate::store::{Collection, FileStore, RecordStore, RecordStoreExt};
use crate::types::{
    Candidate, CandidateCreate, Settings, VoteRecord, VoteRequest, VoteStatus, VoterStats,
};
use crate::{Error, Result};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

pub use ballot::{Ballot, BallotCategory, BallotEntry, build_ballot};
pub use tally::{
    CategoryStanding, CategoryWinners, ElectionResults, Winners, compile_results, compute_winners,
    voter_stats,
};
pub use voting::{AcceptedVote, check_vote, record_vote, vote_status};

/// Election operations over a [`RecordStore`]
pub struct ElectionService<S: RecordStore> {
    store: S,
    write_lock: Mutex<()>,
}

impl ElectionService<FileStore> {
    /// Open a file-backed service in the configured data directory
    pub fn open(config: &StorageConfig) -> Result<Self> {
        Ok(Self::new(FileStore::open(&config.data_dir)?))
    }
}

impl<S: RecordStore> ElectionService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| Error::internal("Election service lock poisoned"))
    }

    fn load_settings(&self) -> Result<Settings> {
        self.store.load(Collection::Settings, Settings::default())
    }

    fn load_candidates(&self) -> Result<Vec<Candidate>> {
        self.store.load(Collection::Candidates, Vec::new())
    }

    fn load_history(&self) -> Result<Vec<VoteRecord>> {
        self.store.load(Collection::VotingHistory, Vec::new())
    }

    // ---- Settings ----

    /// Current settings; the defaults are persisted on first read
    pub fn settings(&self) -> Result<Settings> {
        let _guard = self.lock()?;
        self.load_settings()
    }

    /// Replace the settings singleton
    pub fn update_settings(&self, settings: Settings) -> Result<Settings> {
        let _guard = self.lock()?;
        self.store.save(Collection::Settings, &settings)?;

        tracing::info!(
            "⚙️ Settings updated: status={:?}, roll_number_rule={:?}, show_counts={}",
            settings.election_status,
            settings.roll_number_rule,
            settings.show_vote_counts_to_students
        );
        Ok(settings)
    }

    // ---- Candidates ----

    pub fn candidates(&self) -> Result<Vec<Candidate>> {
        let _guard = self.lock()?;
        self.load_candidates()
    }

    /// Validate and append a new candidate with zero votes
    pub fn add_candidate(&self, request: CandidateCreate) -> Result<Candidate> {
        request.validate()?;

        let _guard = self.lock()?;
        let mut candidates = self.load_candidates()?;

        let mut id = Uuid::new_v4().to_string();
        while candidates.iter().any(|c| c.id == id) {
            id = Uuid::new_v4().to_string();
        }

        let candidate = Candidate::from_request(id, request);
        candidates.push(candidate.clone());
        self.store.save(Collection::Candidates, &candidates)?;

        tracing::info!(
            "👤 Candidate added: id={}, name={}, gender={}",
            candidate.id,
            candidate.name,
            candidate.gender
        );
        Ok(candidate)
    }

    /// Remove a candidate; unknown ids are an error, never a silent success
    pub fn delete_candidate(&self, candidate_id: &str) -> Result<()> {
        let _guard = self.lock()?;
        let mut candidates = self.load_candidates()?;

        let before = candidates.len();
        candidates.retain(|c| c.id != candidate_id);
        if candidates.len() == before {
            return Err(Error::not_found("Candidate", candidate_id));
        }

        self.store.save(Collection::Candidates, &candidates)?;
        tracing::info!("🗑️ Candidate deleted: id={}", candidate_id);
        Ok(())
    }

    // ---- Voting ----

    /// Validate a vote attempt and, if accepted, record it
    pub fn cast_vote(&self, request: &VoteRequest) -> Result<Candidate> {
        let _guard = self.lock()?;

        let settings = self.load_settings()?;
        let mut candidates = self.load_candidates()?;
        let mut history = self.load_history()?;

        let accepted = match check_vote(&settings, &candidates, &history, request) {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(
                    "🚫 Vote rejected: candidate={}, kind={}",
                    request.candidate_id,
                    e.kind()
                );
                return Err(e);
            }
        };
        let identified = accepted.record.is_some();

        let candidate = record_vote(&self.store, &mut candidates, &mut history, accepted)?;
        tracing::info!(
            "🗳️ Vote accepted: candidate={}, gender={}, identified={}, votes={}",
            candidate.id,
            candidate.gender,
            identified,
            candidate.votes
        );
        Ok(candidate)
    }

    /// Which categories a roll number has voted in
    pub fn vote_status(&self, roll_no: &str) -> Result<VoteStatus> {
        let _guard = self.lock()?;
        let history = self.load_history()?;
        Ok(vote_status(&history, roll_no))
    }

    // ---- Results ----

    pub fn voter_stats(&self) -> Result<VoterStats> {
        let _guard = self.lock()?;
        let history = self.load_history()?;
        let candidates = self.load_candidates()?;
        Ok(voter_stats(&history, &candidates))
    }

    pub fn winners(&self) -> Result<Winners> {
        let _guard = self.lock()?;
        Ok(compute_winners(&self.load_candidates()?))
    }

    /// Results board for the admin dashboard
    pub fn results(&self) -> Result<ElectionResults> {
        let _guard = self.lock()?;
        let candidates = self.load_candidates()?;
        let history = self.load_history()?;
        Ok(compile_results(&candidates, &history))
    }

    /// Ballot for a student, optionally identified by roll number
    pub fn ballot(&self, roll_no: Option<&str>) -> Result<Ballot> {
        let _guard = self.lock()?;
        let settings = self.load_settings()?;
        let candidates = self.load_candidates()?;
        let status = match roll_no {
            Some(roll_no) => vote_status(&self.load_history()?, roll_no),
            None => VoteStatus::empty(),
        };
        Ok(build_ballot(&settings, &candidates, &status))
    }
}
