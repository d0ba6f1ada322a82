//! Uniform random partitioning of a plain roster.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::composition::{Composition, CompositionSignature, Draft};
use crate::domain::roster::Participant;
use crate::domain::rules::{TEAM_COUNT, TEAM_SIZE};
use crate::domain::selection::Selection;

/// Shuffle, then slice into three consecutive runs of five.
///
/// Callers guarantee fifteen unique names; a validated
/// [`Roster`](crate::domain::Roster) always does.
pub fn random_partition<R, S>(names: &[S], rng: &mut R) -> Composition
where
    R: Rng + ?Sized,
    S: AsRef<str>,
{
    debug_assert_eq!(names.len(), TEAM_COUNT * TEAM_SIZE);

    let mut pool: Vec<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
    pool.shuffle(rng);

    let mut groups: [Vec<String>; TEAM_COUNT] = Default::default();
    for (slot, chunk) in groups.iter_mut().zip(pool.chunks(TEAM_SIZE)) {
        *slot = chunk.to_vec();
    }
    Composition::from_groups(groups)
}

/// Draw random partitions until one is not in `seen`, up to `max_attempts`.
///
/// When the budget runs out the last draw is returned and marked as not
/// novel.
pub fn random_novel_partition<R, S>(
    names: &[S],
    seen: &HashSet<CompositionSignature>,
    max_attempts: usize,
    rng: &mut R,
) -> Selection<Composition>
where
    R: Rng + ?Sized,
    S: AsRef<str>,
{
    let mut last = random_partition(names, rng);
    for attempt in 1..=max_attempts {
        if attempt > 1 {
            last = random_partition(names, rng);
        }
        if !seen.contains(&last.signature()) {
            return Selection {
                pick: last,
                novel: true,
                attempts: attempt,
            };
        }
    }
    let novel = !seen.contains(&last.signature());
    Selection {
        pick: last,
        novel,
        attempts: max_attempts,
    }
}

/// First five, next five, last five of a strength ordering. The baseline a
/// snake draft is measured against.
pub fn consecutive_draft(ordered: &[Participant]) -> Draft {
    let mut groups: [Vec<Participant>; TEAM_COUNT] = Default::default();
    for (slot, chunk) in groups.iter_mut().zip(ordered.chunks(TEAM_SIZE)) {
        *slot = chunk.to_vec();
    }
    Draft::from_groups(groups)
}
