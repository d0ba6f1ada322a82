//! Compositions, their canonical signatures and balance scoring.

use std::fmt;

use xxhash_rust::xxh3::Xxh3;

use crate::domain::roster::{Participant, Weight};
use crate::domain::rules::TEAM_COUNT;

/// Three disjoint groups covering the whole roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    groups: [Vec<String>; TEAM_COUNT],
}

impl Composition {
    pub fn from_groups(groups: [Vec<String>; TEAM_COUNT]) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[Vec<String>; TEAM_COUNT] {
        &self.groups
    }

    pub fn into_groups(self) -> [Vec<String>; TEAM_COUNT] {
        self.groups
    }

    /// Every member, group by group.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().flatten().map(String::as_str)
    }

    pub fn signature(&self) -> CompositionSignature {
        CompositionSignature::of(&self.groups)
    }
}

/// Canonical form of a composition: names sorted inside each group, then
/// the groups sorted. Slot assignment and in-group order do not matter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositionSignature(Vec<Vec<String>>);

impl CompositionSignature {
    pub fn of(groups: &[Vec<String>]) -> Self {
        let mut canonical: Vec<Vec<String>> = groups
            .iter()
            .map(|g| {
                let mut g = g.clone();
                g.sort();
                g
            })
            .collect();
        canonical.sort();
        Self(canonical)
    }

    pub fn groups(&self) -> &[Vec<String>] {
        &self.0
    }

    /// Compact 64-bit digest for log fields and external bookkeeping.
    pub fn digest(&self) -> u64 {
        let mut hasher = Xxh3::new();
        for group in &self.0 {
            hasher.update(&(group.len() as u64).to_le_bytes());
            for name in group {
                hasher.update(&(name.len() as u64).to_le_bytes());
                hasher.update(name.as_bytes());
            }
        }
        hasher.digest()
    }
}

impl fmt::Display for CompositionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(|g| g.join(", ")).collect();
        f.write_str(&rendered.join(" | "))
    }
}

/// Spread of the group totals, then their variance. Lower is better.
///
/// Variance is kept as the exact integer `Σ(3·sᵢ − T)²` over totals in
/// tenths, which is 27 × 100 × the population variance in rating points.
/// The derived ordering compares spread first, then variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BalanceScore {
    spread: u32,
    variance_x27: u64,
}

impl BalanceScore {
    pub fn from_totals(totals: &[Weight; TEAM_COUNT]) -> Self {
        let sums = totals.map(|w| i64::from(w.tenths()));
        let total: i64 = sums.iter().sum();
        let max = sums.iter().copied().max().unwrap_or(0);
        let min = sums.iter().copied().min().unwrap_or(0);
        let variance_x27 = sums
            .iter()
            .map(|&s| {
                let d = 3 * s - total;
                (d * d) as u64
            })
            .sum();

        Self {
            spread: (max - min) as u32,
            variance_x27,
        }
    }

    /// Max total minus min total.
    pub fn spread(&self) -> Weight {
        Weight::total(self.spread)
    }

    /// Population variance of the three totals, in rating points squared.
    pub fn variance(&self) -> f64 {
        self.variance_x27 as f64 / 2700.0
    }
}

/// A composition with the per-group totals it was scored on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub composition: Composition,
    pub totals: [Weight; TEAM_COUNT],
    pub score: BalanceScore,
}

impl Draft {
    pub fn from_groups(groups: [Vec<Participant>; TEAM_COUNT]) -> Self {
        let totals = groups.each_ref().map(|g| g.iter().map(|p| p.weight).sum());
        let score = BalanceScore::from_totals(&totals);
        let composition = Composition::from_groups(
            groups.map(|g| g.into_iter().map(|p| p.name).collect()),
        );
        Self {
            composition,
            totals,
            score,
        }
    }

    pub fn signature(&self) -> CompositionSignature {
        self.composition.signature()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(points: u32) -> Weight {
        Weight::from_tenths(points * 10).unwrap()
    }

    fn groups(raw: [[&str; 2]; 3]) -> [Vec<String>; 3] {
        raw.map(|g| g.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn signature_ignores_slot_and_member_order() {
        let a = Composition::from_groups(groups([["a", "b"], ["c", "d"], ["e", "f"]]));
        let b = Composition::from_groups(groups([["f", "e"], ["b", "a"], ["d", "c"]]));
        assert_eq!(a.signature(), b.signature());
        assert_eq!(a.signature().digest(), b.signature().digest());
        assert_eq!(a.signature().to_string(), "a, b | c, d | e, f");
    }

    #[test]
    fn signature_distinguishes_different_partitions() {
        let a = Composition::from_groups(groups([["a", "b"], ["c", "d"], ["e", "f"]]));
        let b = Composition::from_groups(groups([["a", "c"], ["b", "d"], ["e", "f"]]));
        assert_ne!(a.signature(), b.signature());
        assert_ne!(a.signature().digest(), b.signature().digest());
    }

    #[test]
    fn digest_is_not_fooled_by_separators() {
        let a = CompositionSignature::of(&[vec!["a, b".to_string()], vec!["c".to_string()]]);
        let b = CompositionSignature::of(&[
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string()],
        ]);
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn balance_score_spread_and_variance() {
        let score = BalanceScore::from_totals(&[w(30), w(33), w(36)]);
        assert_eq!(score.spread(), w(6));
        // Mean 33, deviations -3/0/3 -> variance 6.
        assert!((score.variance() - 6.0).abs() < 1e-9);

        let even = BalanceScore::from_totals(&[w(33), w(33), w(33)]);
        assert_eq!(even.spread(), Weight::ZERO);
        assert_eq!(even.variance(), 0.0);
        assert!(even < score);
    }

    #[test]
    fn spread_outranks_variance() {
        // Spread 4 with a tight middle vs. spread 3 with both ends away.
        let wide = BalanceScore::from_totals(&[w(30), w(32), w(34)]);
        let narrow = BalanceScore::from_totals(&[w(30), w(33), w(33)]);
        assert!(narrow.spread() < wide.spread());
        assert!(narrow < wide);
    }

    #[test]
    fn draft_totals_follow_groups() {
        let p = |n: &str, pts| Participant::new(n, w(pts));
        let draft = Draft::from_groups([
            vec![p("a", 9), p("b", 1)],
            vec![p("c", 5), p("d", 4)],
            vec![p("e", 7), p("f", 2)],
        ]);
        assert_eq!(draft.totals, [w(10), w(9), w(9)]);
        assert_eq!(draft.score.spread(), w(1));
        assert_eq!(draft.composition.groups()[1], vec!["c", "d"]);
        assert_eq!(draft.composition.members().count(), 6);
    }
}
