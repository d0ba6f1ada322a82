//! Fixed shape of a draft: three groups of five.

pub const TEAM_COUNT: usize = 3;
pub const TEAM_SIZE: usize = 5;
pub const ROSTER_SIZE: usize = TEAM_COUNT * TEAM_SIZE;

/// Highest accepted rating, in tenths (99.9).
pub const MAX_WEIGHT_TENTHS: u32 = 999;

/// Attempt budget for the novelty search when nothing else is configured.
pub const DEFAULT_NOVELTY_ATTEMPTS: usize = 80;

/// Chance that a novelty attempt perturbs the strength ordering.
pub const DEFAULT_PERTURB_PROBABILITY: f64 = 0.5;
