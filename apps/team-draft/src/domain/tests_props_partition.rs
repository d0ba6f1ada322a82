//! Property tests for partitioning, signatures and selection (pure domain).

use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use team_test_support::proptest_prelude::proptest_config;

use crate::domain::composition::{Composition, CompositionSignature};
use crate::domain::partition::{consecutive_draft, random_partition};
use crate::domain::roster::Participant;
use crate::domain::rules::{TEAM_COUNT, TEAM_SIZE};
use crate::domain::selection::{select_new_balanced, NoveltyPolicy};
use crate::domain::snake::{best_snake_draft, snake_candidates};
use crate::domain::test_gens;

fn assert_covers(comp: &Composition, expected: &[String]) -> Result<(), TestCaseError> {
    for group in comp.groups() {
        prop_assert_eq!(group.len(), TEAM_SIZE);
    }
    let mut members: Vec<&str> = comp.members().collect();
    members.sort_unstable();
    let mut want: Vec<&str> = expected.iter().map(String::as_str).collect();
    want.sort_unstable();
    prop_assert_eq!(members, want);
    Ok(())
}

fn names_of(ordered: &[Participant]) -> Vec<String> {
    ordered.iter().map(|p| p.name.clone()).collect()
}

proptest! {
    #![proptest_config(proptest_config())]

    /// Property: random partitions are complete, disjoint and five-wide.
    #[test]
    fn prop_random_partition_is_complete(names in test_gens::names(), seed in any::<u64>()) {
        let comp = random_partition(&names, &mut ChaCha20Rng::seed_from_u64(seed));
        assert_covers(&comp, &names)?;
    }

    /// Property: every snake candidate is complete, disjoint and five-wide.
    #[test]
    fn prop_snake_candidates_are_complete(ordered in test_gens::strength_order()) {
        let names = names_of(&ordered);
        for draft in snake_candidates(&ordered) {
            assert_covers(&draft.composition, &names)?;
        }
    }

    /// Property: signatures ignore slot order and in-group order.
    #[test]
    fn prop_signature_invariance(
        names in test_gens::names(),
        seed in any::<u64>(),
        slot_rotation in 0usize..TEAM_COUNT,
        swap_slots in any::<bool>(),
        reverse_members in any::<bool>(),
    ) {
        let comp = random_partition(&names, &mut ChaCha20Rng::seed_from_u64(seed));
        let mut groups = comp.groups().clone();
        groups.rotate_left(slot_rotation);
        if swap_slots {
            groups.swap(0, 1);
        }
        if reverse_members {
            for g in groups.iter_mut() {
                g.reverse();
            }
        }
        let permuted = Composition::from_groups(groups);
        prop_assert_eq!(comp.signature(), permuted.signature());
        prop_assert_eq!(comp.signature().digest(), permuted.signature().digest());
    }

    /// Property: snake candidates involve no randomness.
    #[test]
    fn prop_snake_is_deterministic(ordered in test_gens::strength_order()) {
        prop_assert_eq!(snake_candidates(&ordered), snake_candidates(&ordered));
    }

    /// Property: the selected draft has the minimal spread of its set.
    #[test]
    fn prop_best_has_minimal_spread(ordered in test_gens::strength_order()) {
        let best = best_snake_draft(&ordered);
        for candidate in snake_candidates(&ordered) {
            prop_assert!(best.score.spread() <= candidate.score.spread());
            prop_assert!(best.score <= candidate.score);
        }
    }

    /// Property: snake drafting never does worse than consecutive slicing.
    #[test]
    fn prop_snake_beats_consecutive(ordered in test_gens::strength_order()) {
        let best = best_snake_draft(&ordered);
        let naive = consecutive_draft(&ordered);
        prop_assert!(best.score.spread() <= naive.score.spread());
    }

    /// Property: with only one signature seen, the novelty search finds
    /// another one when the tie-heavy roster allows it.
    #[test]
    fn prop_novelty_search_avoids_seen(
        roster in test_gens::rated_roster(true),
        seed in any::<u64>(),
    ) {
        let base = roster.strength_order().unwrap_or_default();
        let seen: HashSet<CompositionSignature> =
            [best_snake_draft(&base).signature()].into_iter().collect();
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let picked = select_new_balanced(&base, &seen, &NoveltyPolicy::default(), &mut rng);
        prop_assert!(picked.novel);
        prop_assert!(!seen.contains(&picked.pick.signature()));
        assert_covers(&picked.pick.composition, &names_of(&base))?;
    }
}
