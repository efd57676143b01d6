//! End-to-end election workflows against the file-backed store

use cr_election::{
    ElectionService, Error, RejectionKind, Result,
    config::Config,
    store::{Collection, FileStore, RecordStore},
    types::{
        Candidate, CandidateCreate, ElectionStatus, Gender, RollNumberRule, Settings, VoteRecord,
        VoteRequest,
    },
};
use tempfile::TempDir;

fn settings(status: ElectionStatus, rule: RollNumberRule) -> Settings {
    Settings {
        election_status: status,
        roll_number_rule: rule,
        show_vote_counts_to_students: false,
    }
}

fn file_service() -> Result<(TempDir, ElectionService<FileStore>)> {
    let dir = TempDir::new()?;
    let config = Config::for_testing(dir.path())?;
    let service = ElectionService::open(&config.storage)?;
    Ok((dir, service))
}

#[tokio::test]
async fn test_scenario_repeat_identified_vote_is_rejected() -> Result<()> {
    println!("🗳️ Testing repeat identified vote...");

    let (_dir, service) = file_service()?;
    service.update_settings(settings(ElectionStatus::Open, RollNumberRule::Optional))?;
    let c1 = service.add_candidate(CandidateCreate::new("C1", "Science", "A", Gender::Boy))?;

    let updated = service.cast_vote(&VoteRequest::identified(&c1.id, "S1"))?;
    assert_eq!(updated.votes, 1);
    println!("✅ First vote accepted");

    let err = service
        .cast_vote(&VoteRequest::identified(&c1.id, "S1"))
        .unwrap_err();
    assert_eq!(err.rejection_kind(), Some(RejectionKind::AlreadyVoted));
    assert!(err.to_string().contains("Boy"));
    assert_eq!(service.candidates()?[0].votes, 1);
    println!("✅ Second vote rejected, count unchanged");

    Ok(())
}

#[tokio::test]
async fn test_scenario_closed_election_rejects_every_vote() -> Result<()> {
    let (_dir, service) = file_service()?;
    service.update_settings(settings(ElectionStatus::Open, RollNumberRule::Optional))?;
    let c1 = service.add_candidate(CandidateCreate::new("C1", "Science", "A", Gender::Boy))?;
    service.cast_vote(&VoteRequest::anonymous(&c1.id))?;

    service.update_settings(settings(ElectionStatus::Closed, RollNumberRule::Optional))?;

    for request in [
        VoteRequest::anonymous(&c1.id),
        VoteRequest::identified(&c1.id, "S2"),
        VoteRequest::anonymous("no-such-candidate"),
    ] {
        let err = service.cast_vote(&request).unwrap_err();
        assert_eq!(err.rejection_kind(), Some(RejectionKind::ElectionClosed));
    }
    assert_eq!(service.candidates()?[0].votes, 1);
    assert_eq!(service.voter_stats()?.unique_voter_count, 0);

    Ok(())
}

#[tokio::test]
async fn test_scenario_tied_winners() -> Result<()> {
    let (dir, service) = file_service()?;

    // Seed vote counts directly, as an existing deployment would have them
    let seeded = vec![
        Candidate {
            id: "c1".to_string(),
            name: "First".to_string(),
            stream: "Science".to_string(),
            division: "A".to_string(),
            gender: Gender::Boy,
            votes: 3,
        },
        Candidate {
            id: "c2".to_string(),
            name: "Second".to_string(),
            stream: "Commerce".to_string(),
            division: "B".to_string(),
            gender: Gender::Boy,
            votes: 3,
        },
    ];
    std::fs::write(
        dir.path().join("candidates.json"),
        serde_json::to_string(&seeded)?,
    )?;

    let winners = service.winners()?;
    let boys = winners.get(Gender::Boy).unwrap();
    let ids: Vec<&str> = boys.winners.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c2"]);
    assert!(boys.tie);
    assert!(winners.get(Gender::Girl).unwrap().is_undecided());

    Ok(())
}

#[tokio::test]
async fn test_scenario_invalid_candidate_is_rejected() -> Result<()> {
    let (_dir, service) = file_service()?;
    service.add_candidate(CandidateCreate::new("Existing", "Arts", "C", Gender::Girl))?;
    let before = service.candidates()?;

    let err = service
        .add_candidate(CandidateCreate::new("", "Arts", "C", Gender::Girl))
        .unwrap_err();
    assert!(matches!(err, Error::Validation { ref field, .. } if field == "name"));
    assert_eq!(service.candidates()?, before);

    Ok(())
}

#[tokio::test]
async fn test_mandatory_roll_number() -> Result<()> {
    let (_dir, service) = file_service()?;
    service.update_settings(settings(ElectionStatus::Open, RollNumberRule::Mandatory))?;
    let girl = service.add_candidate(CandidateCreate::new("Sana", "Arts", "A", Gender::Girl))?;

    for request in [
        VoteRequest::anonymous(&girl.id),
        VoteRequest::identified(&girl.id, ""),
        VoteRequest::identified(&girl.id, "   "),
    ] {
        let err = service.cast_vote(&request).unwrap_err();
        assert_eq!(
            err.rejection_kind(),
            Some(RejectionKind::RollNumberRequired)
        );
    }
    assert_eq!(service.candidates()?[0].votes, 0);

    service.cast_vote(&VoteRequest::identified(&girl.id, "S5"))?;
    assert_eq!(service.candidates()?[0].votes, 1);

    Ok(())
}

#[tokio::test]
async fn test_full_election_lifecycle() -> Result<()> {
    println!("🏫 Testing full election lifecycle...");

    let (dir, service) = file_service()?;
    service.update_settings(settings(ElectionStatus::Open, RollNumberRule::Optional))?;

    let b1 = service.add_candidate(CandidateCreate::new("Arjun", "Science", "A", Gender::Boy))?;
    let b2 = service.add_candidate(CandidateCreate::new("Kabir", "Commerce", "B", Gender::Boy))?;
    let g1 = service.add_candidate(CandidateCreate::new("Meera", "Arts", "C", Gender::Girl))?;

    service.cast_vote(&VoteRequest::identified(&b1.id, "S1"))?;
    service.cast_vote(&VoteRequest::identified(&g1.id, "S1"))?;
    service.cast_vote(&VoteRequest::identified(&b1.id, "S2"))?;
    service.cast_vote(&VoteRequest::identified(&b2.id, "S3"))?;
    service.cast_vote(&VoteRequest::anonymous(&b2.id))?;
    service.cast_vote(&VoteRequest::anonymous(&b1.id))?;
    println!("✅ Six votes cast");

    let status = service.vote_status("S1")?;
    assert!(status.has_voted(Gender::Boy));
    assert!(status.has_voted(Gender::Girl));
    assert!(status.is_complete());

    let status = service.vote_status("S2")?;
    assert!(status.has_voted(Gender::Boy));
    assert!(!status.has_voted(Gender::Girl));

    let stats = service.voter_stats()?;
    assert_eq!(stats.unique_voter_count, 3);
    assert_eq!(stats.total_vote_count, 6);

    let results = service.results()?;
    let boys = results.category(Gender::Boy).unwrap();
    assert_eq!(boys.candidates[0].id, b1.id);
    assert_eq!(boys.winners.winners.len(), 1);
    assert_eq!(boys.winners.top_votes, 3);
    let girls = results.category(Gender::Girl).unwrap();
    assert_eq!(girls.winners.winners[0].id, g1.id);
    println!("✅ Results computed");

    // Persisted layout matches the three-document schema
    let history: Vec<VoteRecord> =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("voted_students.json"))?)?;
    assert_eq!(history.len(), 4);
    assert_eq!(
        history[0],
        VoteRecord {
            roll_no: "S1".to_string(),
            voted_for: Gender::Boy
        }
    );
    assert!(dir.path().join("settings.json").exists());

    // Deleting a candidate removes their votes from the tally
    service.delete_candidate(&b2.id)?;
    assert_eq!(service.voter_stats()?.total_vote_count, 4);

    Ok(())
}

#[tokio::test]
async fn test_state_survives_reopening_the_store() -> Result<()> {
    let dir = TempDir::new()?;
    let config = Config::for_testing(dir.path())?;

    let candidate_id = {
        let service = ElectionService::open(&config.storage)?;
        service.update_settings(settings(ElectionStatus::Open, RollNumberRule::Optional))?;
        let c = service.add_candidate(CandidateCreate::new("Zoya", "Arts", "A", Gender::Girl))?;
        service.cast_vote(&VoteRequest::identified(&c.id, "S1"))?;
        c.id
    };

    let reopened = ElectionService::open(&config.storage)?;
    assert!(reopened.settings()?.is_open());
    assert_eq!(reopened.candidates()?[0].votes, 1);

    let err = reopened
        .cast_vote(&VoteRequest::identified(&candidate_id, "S1"))
        .unwrap_err();
    assert_eq!(err.rejection_kind(), Some(RejectionKind::AlreadyVoted));

    Ok(())
}

#[tokio::test]
async fn test_reads_are_idempotent() -> Result<()> {
    let (_dir, service) = file_service()?;
    service.add_candidate(CandidateCreate::new("Tara", "Science", "D", Gender::Girl))?;

    assert_eq!(service.settings()?, service.settings()?);
    assert_eq!(service.candidates()?, service.candidates()?);
    assert_eq!(
        service.store().read(Collection::Candidates)?,
        service.store().read(Collection::Candidates)?
    );

    Ok(())
}
