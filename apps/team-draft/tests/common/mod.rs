#![allow(dead_code)]

use team_draft::{DraftConfig, MemoryDutyStore, Roster, TeamService};
use team_test_support::fixtures;

// Logging is auto-installed for every test binary that declares `mod common`
#[ctor::ctor]
fn init_logging() {
    team_test_support::logging::init();
}

pub fn seeded_config(seed: u64) -> DraftConfig {
    DraftConfig {
        rng_seed: Some(seed),
        ..DraftConfig::default()
    }
}

pub fn memory_service(seed: u64) -> TeamService<MemoryDutyStore> {
    TeamService::new(&seeded_config(seed), MemoryDutyStore::new())
}

pub fn plain_roster() -> Roster {
    Roster::plain(fixtures::NAMES).expect("fixture roster is valid")
}

pub fn rated_roster() -> Roster {
    Roster::rated_from_text(fixtures::rated_pairs()).expect("fixture ratings are valid")
}

pub fn ranked_roster() -> Roster {
    Roster::ranked(fixtures::NAMES).expect("fixture roster is valid")
}

/// Sorted copy of every member across the three groups.
pub fn sorted_members(composition: &team_draft::Composition) -> Vec<String> {
    let mut members: Vec<String> = composition.members().map(str::to_string).collect();
    members.sort();
    members
}

pub fn sorted_fixture_names() -> Vec<String> {
    let mut names = fixtures::names();
    names.sort();
    names
}
