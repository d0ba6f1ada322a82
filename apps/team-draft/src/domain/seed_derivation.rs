//! RNG seed derivation utilities for reproducible runs.
//!
//! A single base seed fans out into independent streams per roster and per
//! reshuffle, so a simulator run or a seeded service replays exactly.

/// SplitMix64 finalizer: spreads nearby inputs across the whole range.
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Seed for the `roster_no`-th roster of a run.
pub fn derive_roster_seed(base_seed: u64, roster_no: u64) -> u64 {
    mix(base_seed ^ mix(roster_no.wrapping_mul(2).wrapping_add(1)))
}

/// Seed for the `reshuffle_no`-th reshuffle of a roster.
///
/// Uses an even offset so it never collides with the roster stream for
/// the same numbers.
pub fn derive_reshuffle_seed(base_seed: u64, roster_no: u64, reshuffle_no: u64) -> u64 {
    let roster = derive_roster_seed(base_seed, roster_no);
    mix(roster ^ mix(reshuffle_no.wrapping_mul(2)))
}
