//! Domain layer: pure partitioning, balancing and rotation logic.

pub mod composition;
pub mod duty;
pub mod partition;
pub mod roster;
pub mod rules;
pub mod seed_derivation;
pub mod selection;
pub mod snake;
pub mod tier_shuffle;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props_duty;
#[cfg(test)]
mod tests_props_partition;

// Re-exports for ergonomics
pub use composition::{BalanceScore, Composition, CompositionSignature, Draft};
pub use duty::{duty_key, DutyRecord};
pub use partition::{consecutive_draft, random_novel_partition, random_partition};
pub use roster::{Participant, Roster, RosterMode, Weight};
pub use rules::{ROSTER_SIZE, TEAM_COUNT, TEAM_SIZE};
pub use seed_derivation::{derive_reshuffle_seed, derive_roster_seed};
pub use selection::{select_best, select_new_balanced, NoveltyPolicy, Selection};
pub use snake::{best_snake_draft, snake_candidates, snake_draft, SnakeVariant};
pub use tier_shuffle::{perturb, shuffle_blocks, shuffle_tie_groups, Perturbation};
