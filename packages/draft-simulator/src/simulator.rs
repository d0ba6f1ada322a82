//! Offline runs of the draft engine over generated rosters.
//!
//! Every roster and every reshuffle gets its own seed derived from the run's
//! base seed, so a single roster can be replayed without rerunning the rest.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use team_draft::domain::{
    best_snake_draft, consecutive_draft, derive_reshuffle_seed, derive_roster_seed,
    random_novel_partition, random_partition, select_new_balanced, ROSTER_SIZE,
};
use team_draft::{BalanceScore, DomainError, NoveltyPolicy, Roster, RosterMode, Weight};

use crate::types::Mode;

/// Ratings are drawn from 3.0 to 9.5 in half-point steps, which leaves
/// plenty of ties for the tie-group shuffle to work with.
const MIN_RATING_POINTS: u32 = 3;
const MAX_RATING_POINTS: u32 = 9;
const HALF_POINT_PROBABILITY: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct ReshuffleOutcome {
    pub score: Option<BalanceScore>,
    pub novel: bool,
    pub attempts: usize,
}

#[derive(Debug, Clone)]
pub struct RosterRun {
    pub roster_no: u64,
    pub seed: u64,
    pub mode: RosterMode,
    pub first_score: Option<BalanceScore>,
    /// Score of the first/next/last five split of the strength ordering.
    pub naive_score: Option<BalanceScore>,
    pub reshuffles: Vec<ReshuffleOutcome>,
    pub distinct_signatures: usize,
}

pub struct Simulator {
    mode: Mode,
    reshuffles: u32,
    policy: NoveltyPolicy,
}

impl Simulator {
    pub fn new(mode: Mode, reshuffles: u32, policy: NoveltyPolicy) -> Self {
        Self {
            mode,
            reshuffles,
            policy,
        }
    }

    /// Submit one generated roster, then reshuffle it `reshuffles` times.
    pub fn run_roster(&self, base_seed: u64, roster_no: u64) -> Result<RosterRun, DomainError> {
        let seed = derive_roster_seed(base_seed, roster_no);
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let roster = generate_roster(self.mode, &mut rng)?;
        let names = roster.names();
        let ordered = roster.strength_order();

        let (first, first_score, naive_score) = match &ordered {
            None => (random_partition(&names, &mut rng), None, None),
            Some(ordered) => {
                let best = best_snake_draft(ordered);
                let naive = consecutive_draft(ordered);
                (best.composition, Some(best.score), Some(naive.score))
            }
        };

        let mut seen = HashSet::from([first.signature()]);
        let mut reshuffles = Vec::with_capacity(self.reshuffles as usize);
        for reshuffle_no in 1..=u64::from(self.reshuffles) {
            let seed = derive_reshuffle_seed(base_seed, roster_no, reshuffle_no);
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let (signature, outcome) = match &ordered {
                None => {
                    let picked = random_novel_partition(
                        &names,
                        &seen,
                        self.policy.max_attempts,
                        &mut rng,
                    );
                    let outcome = ReshuffleOutcome {
                        score: None,
                        novel: picked.novel,
                        attempts: picked.attempts,
                    };
                    (picked.pick.signature(), outcome)
                }
                Some(ordered) => {
                    let picked = select_new_balanced(ordered, &seen, &self.policy, &mut rng);
                    let outcome = ReshuffleOutcome {
                        score: Some(picked.pick.score),
                        novel: picked.novel,
                        attempts: picked.attempts,
                    };
                    (picked.pick.signature(), outcome)
                }
            };
            seen.insert(signature);
            reshuffles.push(outcome);
        }

        Ok(RosterRun {
            roster_no,
            seed,
            mode: roster.mode(),
            first_score,
            naive_score,
            reshuffles,
            distinct_signatures: seen.len(),
        })
    }
}

fn generate_roster<R: Rng + ?Sized>(mode: Mode, rng: &mut R) -> Result<Roster, DomainError> {
    let names: Vec<String> = (1..=ROSTER_SIZE).map(|i| format!("player-{i:02}")).collect();
    match mode {
        Mode::Plain => Roster::plain(names),
        Mode::Ranked => {
            let mut names = names;
            names.shuffle(rng);
            Roster::ranked(names)
        }
        Mode::Rated => {
            let mut entries = Vec::with_capacity(names.len());
            for name in names {
                let half = if rng.random_bool(HALF_POINT_PROBABILITY) { 5 } else { 0 };
                let points = rng.random_range(MIN_RATING_POINTS..=MAX_RATING_POINTS);
                entries.push((name, Weight::from_tenths(points * 10 + half)?));
            }
            Roster::rated(entries)
        }
    }
}
