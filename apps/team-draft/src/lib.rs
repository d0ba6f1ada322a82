#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod state;
pub mod store;

// Re-exports for public API
pub use config::{ConfigError, DraftConfig};
pub use domain::{
    BalanceScore, Composition, CompositionSignature, Draft, DutyRecord, NoveltyPolicy, Participant,
    Roster, RosterMode, Weight,
};
pub use errors::DomainError;
pub use services::{CompletionOutcome, TeamService, TeamSheet};
pub use state::{RequesterId, SessionStore};
pub use store::{DutyStore, JsonFileDutyStore, MemoryDutyStore, StoreError};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    team_test_support::logging::init();
}
