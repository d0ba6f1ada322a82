pub mod dedup;
pub mod duty_rotation;
pub mod teams;

pub use dedup::CompletionDeduper;
pub use duty_rotation::DutyRotation;
pub use teams::{CompletionOutcome, TeamService, TeamSheet};
