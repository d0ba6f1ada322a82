//! Roster shapes, ratings and the validation every roster passes before
//! anything is partitioned.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use crate::domain::rules::{MAX_WEIGHT_TENTHS, ROSTER_SIZE};
use crate::errors::domain::{DomainError, ValidationKind};

/// A skill rating in fixed-point tenths (`7.5` is stored as `75`).
///
/// Sums and spreads stay exact, so equal ratings really are equal when the
/// tier shuffler looks for ties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Weight(u32);

impl Weight {
    pub const ZERO: Weight = Weight(0);

    /// Build a single rating from tenths. Rejects anything above 99.9.
    pub fn from_tenths(tenths: u32) -> Result<Self, DomainError> {
        if tenths > MAX_WEIGHT_TENTHS {
            return Err(DomainError::validation(
                ValidationKind::MalformedWeight(format!("{}", Weight(tenths))),
                format!("rating {} is above 99.9", Weight(tenths)),
            ));
        }
        Ok(Self(tenths))
    }

    /// Totals and spreads are sums of bounded ratings and may exceed 99.9.
    pub(crate) const fn total(tenths: u32) -> Self {
        Self(tenths)
    }

    /// Synthesized weight for the `rank`-th strongest entry of a ranked
    /// roster (0-based): 15 for the first down to 1 for the last.
    pub fn for_rank(rank: usize) -> Self {
        Self((ROSTER_SIZE.saturating_sub(rank)) as u32 * 10)
    }

    pub const fn tenths(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10.0
    }

    /// Parse `0`..`99.9` with at most one decimal place. A comma is
    /// accepted as the decimal separator.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let malformed = || {
            DomainError::validation(
                ValidationKind::MalformedWeight(raw.to_string()),
                format!("'{raw}' is not a rating between 0 and 99.9"),
            )
        };

        let normalized = raw.trim().replace(',', ".");
        let (whole, frac) = match normalized.split_once('.') {
            Some((w, f)) => (w, Some(f)),
            None => (normalized.as_str(), None),
        };

        if whole.is_empty() || whole.len() > 2 || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let tenth = match frac.map(str::as_bytes) {
            None => 0,
            Some([d]) if d.is_ascii_digit() => u32::from(d - b'0'),
            Some(_) => return Err(malformed()),
        };
        let whole: u32 = whole.parse().map_err(|_| malformed())?;

        Ok(Self(whole * 10 + tenth))
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (whole, tenth) = (self.0 / 10, self.0 % 10);
        if tenth == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.{tenth}")
        }
    }
}

impl FromStr for Weight {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Group totals can exceed 99.9; only single ratings are bounded.
impl Add for Weight {
    type Output = Weight;

    fn add(self, rhs: Weight) -> Weight {
        Weight(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Weight>>(iter: I) -> Weight {
        iter.fold(Weight::ZERO, Add::add)
    }
}

/// An identifier together with its rating.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Participant {
    pub name: String,
    pub weight: Weight,
}

impl Participant {
    pub fn new(name: impl Into<String>, weight: Weight) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosterMode {
    Plain,
    Rated,
    Ranked,
}

impl fmt::Display for RosterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RosterMode::Plain => "plain",
            RosterMode::Rated => "rated",
            RosterMode::Ranked => "ranked",
        };
        f.write_str(s)
    }
}

/// A validated roster of exactly fifteen unique identifiers.
///
/// The variants can only be built through the validating constructors, so
/// every `Roster` in the system is already safe to partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Roster {
    /// Names only, no strength information.
    Plain(Vec<String>),
    /// Names with explicit ratings, in submission order.
    Rated(Vec<Participant>),
    /// Names listed strongest first.
    Ranked(Vec<String>),
}

impl Roster {
    pub fn plain<I, S>(names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Roster::Plain(validate_names(names)?))
    }

    pub fn ranked<I, S>(names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Roster::Ranked(validate_names(names)?))
    }

    pub fn rated<I, S>(entries: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (S, Weight)>,
        S: Into<String>,
    {
        let (names, weights): (Vec<String>, Vec<Weight>) =
            entries.into_iter().map(|(n, w)| (n.into(), w)).unzip();
        let names = validate_names(names)?;
        Ok(Roster::Rated(
            names
                .into_iter()
                .zip(weights)
                .map(|(name, weight)| Participant { name, weight })
                .collect(),
        ))
    }

    /// Rated roster from raw rating text, as handed over by the parser.
    pub fn rated_from_text<I, S, T>(entries: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: AsRef<str>,
    {
        let parsed = entries
            .into_iter()
            .map(|(name, raw)| Ok((name.into(), Weight::parse(raw.as_ref())?)))
            .collect::<Result<Vec<(String, Weight)>, DomainError>>()?;
        Self::rated(parsed)
    }

    pub fn mode(&self) -> RosterMode {
        match self {
            Roster::Plain(_) => RosterMode::Plain,
            Roster::Rated(_) => RosterMode::Rated,
            Roster::Ranked(_) => RosterMode::Ranked,
        }
    }

    /// Display names in submission order.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Roster::Plain(names) | Roster::Ranked(names) => {
                names.iter().map(String::as_str).collect()
            }
            Roster::Rated(entries) => entries.iter().map(|p| p.name.as_str()).collect(),
        }
    }

    /// Strongest-to-weakest ordering with a weight per entry.
    ///
    /// Rated rosters are stably sorted by rating, so equal ratings keep
    /// their submission order. Ranked rosters get synthesized weights
    /// 15 down to 1. Plain rosters carry no strength and return `None`.
    pub fn strength_order(&self) -> Option<Vec<Participant>> {
        match self {
            Roster::Plain(_) => None,
            Roster::Rated(entries) => {
                let mut ordered = entries.clone();
                ordered.sort_by(|a, b| b.weight.cmp(&a.weight));
                Some(ordered)
            }
            Roster::Ranked(names) => Some(
                names
                    .iter()
                    .enumerate()
                    .map(|(rank, name)| Participant::new(name.clone(), Weight::for_rank(rank)))
                    .collect(),
            ),
        }
    }
}

/// Trim, then check count, blanks and duplicates, in that order.
fn validate_names<I, S>(names: I) -> Result<Vec<String>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = names
        .into_iter()
        .map(|n| {
            let n: String = n.into();
            n.trim().to_string()
        })
        .collect();

    if names.len() != ROSTER_SIZE {
        return Err(DomainError::validation(
            ValidationKind::RosterSize {
                expected: ROSTER_SIZE,
                actual: names.len(),
            },
            format!("expected {ROSTER_SIZE} names, got {}", names.len()),
        ));
    }

    if names.iter().any(String::is_empty) {
        return Err(DomainError::validation(
            ValidationKind::EmptyIdentifier,
            "roster contains an empty name",
        ));
    }

    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for name in &names {
        *occurrences.entry(name.as_str()).or_default() += 1;
    }
    let mut reported = HashSet::new();
    let duplicates: Vec<String> = names
        .iter()
        .filter(|n| occurrences[n.as_str()] > 1 && reported.insert(n.as_str()))
        .cloned()
        .collect();
    if !duplicates.is_empty() {
        let detail = format!("duplicate names: {}", duplicates.join(", "));
        return Err(DomainError::validation(
            ValidationKind::DuplicateIdentifiers(duplicates),
            detail,
        ));
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use team_test_support::fixtures;

    #[test]
    fn weight_parses_whole_and_tenths() {
        assert_eq!(Weight::parse("7").unwrap().tenths(), 70);
        assert_eq!(Weight::parse(" 7.5 ").unwrap().tenths(), 75);
        assert_eq!(Weight::parse("7,5").unwrap().tenths(), 75);
        assert_eq!(Weight::parse("0").unwrap(), Weight::ZERO);
        assert_eq!(Weight::parse("99.9").unwrap().tenths(), 999);
    }

    #[test]
    fn weight_rejects_malformed_text() {
        for raw in ["", "abc", "100", "7.55", "7.", ".5", "-1", "1e2", "7.x"] {
            let err = Weight::parse(raw).unwrap_err();
            let kind = err.validation_kind();
            assert!(
                matches!(kind, Some(ValidationKind::MalformedWeight(s)) if s == raw),
                "expected malformed weight for {raw:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn weight_display_drops_trailing_zero_tenth() {
        assert_eq!(Weight::parse("8").unwrap().to_string(), "8");
        assert_eq!(Weight::parse("8.5").unwrap().to_string(), "8.5");
        assert!(Weight::from_tenths(1000).is_err());
        assert_eq!(Weight::from_tenths(999).unwrap().to_string(), "99.9");
    }

    #[test]
    fn plain_roster_trims_and_keeps_display_form() {
        let mut names = fixtures::names();
        names[0] = "  Amrit ".to_string();
        let roster = Roster::plain(names).unwrap();
        assert_eq!(roster.mode(), RosterMode::Plain);
        assert_eq!(roster.names()[0], "Amrit");
        assert_eq!(roster.names()[4], "Émile");
        assert!(roster.strength_order().is_none());
    }

    #[test]
    fn roster_size_is_enforced() {
        let err = Roster::plain(fixtures::NAMES[..14].iter().copied()).unwrap_err();
        assert_eq!(
            err.validation_kind(),
            Some(&ValidationKind::RosterSize {
                expected: 15,
                actual: 14
            })
        );
    }

    #[test]
    fn duplicates_are_listed_once_each() {
        let mut names = fixtures::names();
        names[3] = "Amrit".to_string();
        names[7] = "Amrit".to_string();
        names[9] = "Bea".to_string();
        let err = Roster::ranked(names).unwrap_err();
        assert_eq!(
            err.validation_kind(),
            Some(&ValidationKind::DuplicateIdentifiers(vec![
                "Amrit".to_string(),
                "Bea".to_string()
            ]))
        );
    }

    #[test]
    fn blank_names_are_rejected() {
        let mut names = fixtures::names();
        names[2] = "   ".to_string();
        let err = Roster::plain(names).unwrap_err();
        assert_eq!(err.validation_kind(), Some(&ValidationKind::EmptyIdentifier));
    }

    #[test]
    fn rated_order_is_stable_on_ties() {
        let mut pairs = fixtures::rated_pairs();
        pairs.reverse();
        let roster = Roster::rated_from_text(pairs).unwrap();
        let ordered = roster.strength_order().unwrap();

        let weights: Vec<u32> = ordered.iter().map(|p| p.weight.tenths()).collect();
        assert_eq!(
            weights,
            vec![90, 80, 80, 70, 70, 70, 60, 60, 60, 60, 50, 50, 50, 40, 30]
        );
        // Reversed submission: Chidi (8) was submitted before Bea (8).
        assert_eq!(ordered[1].name, "Chidi");
        assert_eq!(ordered[2].name, "Bea");
    }

    #[test]
    fn rated_from_text_surfaces_bad_rating() {
        let mut pairs = fixtures::rated_pairs();
        pairs[5].1 = "ten".to_string();
        let err = Roster::rated_from_text(pairs).unwrap_err();
        assert!(matches!(
            err.validation_kind(),
            Some(ValidationKind::MalformedWeight(raw)) if raw == "ten"
        ));
    }

    #[test]
    fn ranked_weights_count_down_from_fifteen() {
        let roster = Roster::ranked(fixtures::NAMES).unwrap();
        let ordered = roster.strength_order().unwrap();
        assert_eq!(ordered[0].weight.to_string(), "15");
        assert_eq!(ordered[14].weight.to_string(), "1");
        assert_eq!(ordered[0].name, "Amrit");
    }
}
