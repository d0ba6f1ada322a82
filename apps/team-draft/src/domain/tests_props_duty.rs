//! Property tests for duty rotation (pure domain, no store).

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use team_test_support::proptest_prelude::proptest_config;

use crate::domain::duty::{duty_key, DutyRecord};

fn name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Amrit".to_string()),
        Just("amrit".to_string()),
        Just("Émile".to_string()),
        Just("Bea".to_string()),
        Just("Chidi".to_string()),
    ]
}

proptest! {
    #![proptest_config(proptest_config())]

    /// Property: a repeated report never increments twice.
    #[test]
    fn prop_repeat_report_counts_once(
        history in prop::collection::vec(name(), 0..12),
        who in name(),
    ) {
        let mut rec = DutyRecord::default();
        for n in &history {
            rec.record_completion(n);
        }
        let before = rec.count_for(&who);
        rec.record_completion(&who);
        let after_first = rec.count_for(&who);
        rec.record_completion(&who);
        prop_assert_eq!(rec.count_for(&who), after_first);
        prop_assert!(after_first <= before + 1);
        prop_assert_eq!(rec.last_assignee.clone(), Some(duty_key(&who)));
    }

    /// Property: total count equals the number of assignee changes.
    #[test]
    fn prop_total_counts_changes(history in prop::collection::vec(name(), 0..20)) {
        let mut rec = DutyRecord::default();
        let mut changes = 0u32;
        let mut last: Option<String> = None;
        for n in &history {
            let key = duty_key(n);
            if last.as_deref() != Some(key.as_str()) {
                changes += 1;
            }
            last = Some(key);
            rec.record_completion(n);
        }
        prop_assert_eq!(rec.counts.values().sum::<u32>(), changes);
    }

    /// Property: the previous assignee is never picked while another
    /// minimum-count candidate exists.
    #[test]
    fn prop_next_due_avoids_repeat(
        counts in prop::collection::vec(0u32..3, 4),
        last_idx in 0usize..4,
        seed in any::<u64>(),
    ) {
        let roster = ["A", "B", "C", "D"];
        let rec = DutyRecord {
            counts: roster.iter().zip(&counts).map(|(n, c)| (duty_key(n), *c)).collect(),
            last_assignee: Some(duty_key(roster[last_idx])),
        };
        let min = counts.iter().copied().min().unwrap_or(0);
        let at_min = counts.iter().filter(|c| **c == min).count();

        let picked = rec.next_due(&roster, &mut ChaCha20Rng::seed_from_u64(seed));
        let picked_idx = roster.iter().position(|n| Some(*n) == picked);
        prop_assert!(picked_idx.is_some());
        let picked_idx = picked_idx.unwrap_or_default();
        prop_assert_eq!(counts[picked_idx], min);
        if at_min >= 2 && counts[last_idx] == min {
            prop_assert_ne!(picked_idx, last_idx);
        }
    }
}
