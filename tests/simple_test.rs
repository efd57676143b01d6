//! Simple test to verify compilation and basic functionality

use cr_election::{
    ElectionService, Result,
    config::Config,
    store::MemoryStore,
    types::{CandidateCreate, ElectionStatus, Gender, RollNumberRule, Settings, VoteRequest},
};

#[tokio::test]
async fn test_basic_compilation() -> Result<()> {
    println!("🔧 Testing basic compilation and functionality...");

    // Test configuration
    let config = Config::for_testing("/tmp/cr-election-test")?;
    assert!(config.admin_secret.verify("test-admin-secret"));
    println!("✅ Configuration works");

    // Test service with in-memory store
    let service = ElectionService::new(MemoryStore::new());
    assert_eq!(service.settings()?, Settings::default());
    println!("✅ Default settings work");

    service.update_settings(Settings {
        election_status: ElectionStatus::Open,
        roll_number_rule: RollNumberRule::Optional,
        show_vote_counts_to_students: true,
    })?;

    let boy = service.add_candidate(CandidateCreate::new("Aman", "Science", "A", Gender::Boy))?;
    let girl = service.add_candidate(CandidateCreate::new("Diya", "Arts", "B", Gender::Girl))?;
    println!("✅ Candidate management works");

    service.cast_vote(&VoteRequest::identified(&boy.id, "101"))?;
    service.cast_vote(&VoteRequest::identified(&girl.id, "101"))?;
    service.cast_vote(&VoteRequest::anonymous(&girl.id))?;
    println!("✅ Voting works");

    let stats = service.voter_stats()?;
    assert_eq!(stats.unique_voter_count, 1);
    assert_eq!(stats.total_vote_count, 3);

    let winners = service.winners()?;
    assert_eq!(winners.get(Gender::Girl).unwrap().winners[0].id, girl.id);
    println!("✅ Tallies work");

    println!("🎉 All basic functionality verified!");
    Ok(())
}
