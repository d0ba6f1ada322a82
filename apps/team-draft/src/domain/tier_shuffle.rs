//! Reorderings of a strength ordering that keep its tiers intact.
//!
//! Both strategies return all fifteen participants. Ratings travel with
//! the names, so scoring stays correct whatever the new order is.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::roster::Participant;
use crate::domain::rules::TEAM_COUNT;

/// Block width for [`shuffle_blocks`]: one snake round.
pub const BLOCK_SIZE: usize = TEAM_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perturbation {
    TieGroups,
    Blocks,
}

/// Permute within each maximal run of equal ratings.
pub fn shuffle_tie_groups<R: Rng + ?Sized>(
    ordered: &[Participant],
    rng: &mut R,
) -> Vec<Participant> {
    let mut out = ordered.to_vec();
    let mut start = 0;
    while start < out.len() {
        let weight = out[start].weight;
        let run = out[start..].iter().take_while(|p| p.weight == weight).count();
        out[start..start + run].shuffle(rng);
        start += run;
    }
    out
}

/// Permute within consecutive blocks of [`BLOCK_SIZE`], ignoring ratings.
pub fn shuffle_blocks<R: Rng + ?Sized>(
    ordered: &[Participant],
    rng: &mut R,
) -> Vec<Participant> {
    let mut out = ordered.to_vec();
    for block in out.chunks_mut(BLOCK_SIZE) {
        block.shuffle(rng);
    }
    out
}

pub fn has_ties(ordered: &[Participant]) -> bool {
    ordered.windows(2).any(|w| w[0].weight == w[1].weight)
}

/// Pick a strategy and apply it.
///
/// With ties present, each strategy is chosen half the time. Without ties
/// (ranked rosters, all-distinct ratings) a tie shuffle would be a no-op,
/// so blocks are always used.
pub fn perturb<R: Rng + ?Sized>(
    ordered: &[Participant],
    rng: &mut R,
) -> (Perturbation, Vec<Participant>) {
    if has_ties(ordered) && rng.random_bool(0.5) {
        (Perturbation::TieGroups, shuffle_tie_groups(ordered, rng))
    } else {
        (Perturbation::Blocks, shuffle_blocks(ordered, rng))
    }
}
