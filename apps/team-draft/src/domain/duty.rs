//! Round-robin duty rotation ("who brings the balls next").
//!
//! Counts are keyed by a normalized form of the display name so that
//! "Émile", "emile" and " EMILE " all land on the same counter.

use std::collections::BTreeMap;

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Trim, decompose, drop combining marks, lowercase.
pub fn duty_key(identifier: &str) -> String {
    identifier
        .trim()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Persisted duty history: completions per key plus the latest assignee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyRecord {
    pub counts: BTreeMap<String, u32>,
    #[serde(default)]
    pub last_assignee: Option<String>,
}

impl DutyRecord {
    /// Count for a display name; unknown names count as zero.
    pub fn count_for(&self, identifier: &str) -> u32 {
        self.counts.get(&duty_key(identifier)).copied().unwrap_or(0)
    }

    /// Register a completed duty.
    ///
    /// The count only moves when the assignee differs from the previous
    /// one, but the previous-assignee marker always moves to this key.
    /// Returns whether the count was incremented.
    pub fn record_completion(&mut self, identifier: &str) -> bool {
        let key = duty_key(identifier);
        let changed = self.last_assignee.as_deref() != Some(key.as_str());
        if changed {
            *self.counts.entry(key.clone()).or_insert(0) += 1;
        }
        self.last_assignee = Some(key);
        changed
    }

    /// Who should take the duty next among `roster`.
    ///
    /// Least-frequent first. Among those, the previous assignee is skipped
    /// as long as someone else is also at the minimum; a uniform random
    /// pick decides the rest. `None` only for an empty roster.
    pub fn next_due<'a, S, R>(&self, roster: &'a [S], rng: &mut R) -> Option<&'a str>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let counted: Vec<(&'a str, u32)> = roster
            .iter()
            .map(|s| (s.as_ref(), self.count_for(s.as_ref())))
            .collect();
        let min = counted.iter().map(|(_, c)| *c).min()?;

        let mut candidates: Vec<&'a str> = counted
            .iter()
            .filter(|(_, c)| *c == min)
            .map(|(name, _)| *name)
            .collect();

        if let Some(last) = self.last_assignee.as_deref() {
            if candidates.len() > 1 {
                let others: Vec<&'a str> = candidates
                    .iter()
                    .copied()
                    .filter(|name| duty_key(name) != last)
                    .collect();
                if !others.is_empty() {
                    candidates = others;
                }
            }
        }

        candidates.choose(rng).copied()
    }

    /// Keys with a non-zero count, ascending by count (then key).
    pub fn history(&self) -> Vec<(String, u32)> {
        let mut entries: Vec<(String, u32)> = self
            .counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(key, count)| (key.clone(), *count))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn record(counts: &[(&str, u32)], last: Option<&str>) -> DutyRecord {
        DutyRecord {
            counts: counts.iter().map(|(k, c)| (duty_key(k), *c)).collect(),
            last_assignee: last.map(duty_key),
        }
    }

    #[test]
    fn keys_fold_case_and_diacritics() {
        assert_eq!(duty_key("Émile"), "emile");
        assert_eq!(duty_key("  EMILE "), "emile");
        assert_eq!(duty_key("Zoë"), "zoe");
        assert_eq!(duty_key("Łukasz"), "łukasz");
    }

    #[test]
    fn consecutive_reports_count_once() {
        let mut rec = DutyRecord::default();
        assert!(rec.record_completion("Amrit"));
        assert!(!rec.record_completion("amrit"));
        assert_eq!(rec.count_for("AMRIT"), 1);
        assert_eq!(rec.last_assignee.as_deref(), Some("amrit"));
    }

    #[test]
    fn alternating_reports_all_count() {
        let mut rec = DutyRecord::default();
        rec.record_completion("X");
        rec.record_completion("Y");
        rec.record_completion("X");
        assert_eq!(rec.count_for("x"), 2);
        assert_eq!(rec.count_for("y"), 1);
        assert_eq!(rec.last_assignee.as_deref(), Some("x"));
    }

    #[test]
    fn next_due_skips_previous_assignee() {
        let rec = record(&[("A", 2), ("B", 2), ("C", 3)], Some("a"));
        let roster = ["A", "B", "C"];
        for seed in 0..20 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            assert_eq!(rec.next_due(&roster, &mut rng), Some("B"));
        }
    }

    #[test]
    fn sole_minimum_wins_even_if_previous() {
        let rec = record(&[("A", 1), ("B", 2), ("C", 3)], Some("a"));
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert_eq!(rec.next_due(&["A", "B", "C"], &mut rng), Some("A"));
    }

    #[test]
    fn unknown_names_count_as_zero() {
        let rec = record(&[("A", 1), ("B", 1)], None);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert_eq!(rec.next_due(&["A", "B", "Newcomer"], &mut rng), Some("Newcomer"));
        assert_eq!(rec.next_due::<&str, _>(&[], &mut rng), None);
    }

    #[test]
    fn empty_record_picks_anyone_in_the_roster() {
        let rec = DutyRecord::default();
        let roster = ["A", "B", "C"];
        let mut rng = ChaCha20Rng::seed_from_u64(17);
        let picks: std::collections::HashSet<&str> =
            (0..60).filter_map(|_| rec.next_due(&roster, &mut rng)).collect();
        assert_eq!(picks.len(), 3);
    }

    #[test]
    fn history_skips_zero_and_sorts_ascending() {
        let rec = record(&[("C", 3), ("A", 1), ("Z", 0), ("B", 1)], None);
        assert_eq!(
            rec.history(),
            vec![
                ("a".to_string(), 1),
                ("b".to_string(), 1),
                ("c".to_string(), 3)
            ]
        );
    }

    #[test]
    fn record_round_trips_as_two_field_json() {
        let mut rec = DutyRecord::default();
        rec.record_completion("Émile");
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"counts": {"emile": 1}, "last_assignee": "emile"})
        );
    }
}
