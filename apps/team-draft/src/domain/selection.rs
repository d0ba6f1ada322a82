//! Choosing among candidate drafts, including the novelty search behind
//! "shuffle again".

use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use crate::domain::composition::{CompositionSignature, Draft};
use crate::domain::roster::Participant;
use crate::domain::rules::{DEFAULT_NOVELTY_ATTEMPTS, DEFAULT_PERTURB_PROBABILITY};
use crate::domain::snake::best_snake_draft;
use crate::domain::tier_shuffle::perturb;

/// Outcome of a search that tries to avoid already-produced compositions.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<T> {
    pub pick: T,
    /// False when the budget ran out and a repeat was accepted.
    pub novel: bool,
    pub attempts: usize,
}

/// Budget and perturbation rate for [`select_new_balanced`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoveltyPolicy {
    pub max_attempts: usize,
    pub perturb_probability: f64,
}

impl Default for NoveltyPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_NOVELTY_ATTEMPTS,
            perturb_probability: DEFAULT_PERTURB_PROBABILITY,
        }
    }
}

/// Lowest `(spread, variance)`; the first one wins ties.
pub fn select_best<I>(candidates: I) -> Option<Draft>
where
    I: IntoIterator<Item = Draft>,
{
    candidates.into_iter().min_by_key(|draft| draft.score)
}

/// Best snake draft whose signature is not in `seen`.
///
/// Each attempt perturbs the base ordering with probability
/// `policy.perturb_probability` and keeps the best of the six snake
/// candidates for that ordering. The first unseen result is returned.
/// If none turns up within `policy.max_attempts`, the best draft for the
/// unperturbed base ordering is returned instead.
pub fn select_new_balanced<R: Rng + ?Sized>(
    base: &[Participant],
    seen: &HashSet<CompositionSignature>,
    policy: &NoveltyPolicy,
    rng: &mut R,
) -> Selection<Draft> {
    let probability = policy.perturb_probability.clamp(0.0, 1.0);

    for attempt in 1..=policy.max_attempts {
        let best = if rng.random_bool(probability) {
            let (kind, ordering) = perturb(base, rng);
            debug!(attempt, perturbation = ?kind, "Trying perturbed ordering");
            best_snake_draft(&ordering)
        } else {
            best_snake_draft(base)
        };

        if !seen.contains(&best.signature()) {
            return Selection {
                pick: best,
                novel: true,
                attempts: attempt,
            };
        }
    }

    let fallback = best_snake_draft(base);
    let novel = !seen.contains(&fallback.signature());
    Selection {
        pick: fallback,
        novel,
        attempts: policy.max_attempts,
    }
}
