// Proptest generators for domain types.
// Rosters are generated valid by construction: fifteen distinct names.

use proptest::prelude::*;

use crate::domain::roster::{Participant, Roster, Weight};
use crate::domain::rules::{MAX_WEIGHT_TENTHS, ROSTER_SIZE};

/// Fifteen distinct names with a random prefix so ordering varies.
pub fn names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Z][a-z]{0,6}", ROSTER_SIZE).prop_map(|stems| {
        stems
            .into_iter()
            .enumerate()
            .map(|(i, stem)| format!("{stem}{i}"))
            .collect()
    })
}

/// Ratings drawn from a small pool so ties are common.
pub fn tied_weight() -> impl Strategy<Value = Weight> {
    (3u32..=9).prop_map(|points| Weight::from_tenths(points * 10).unwrap_or(Weight::ZERO))
}

/// Any valid rating.
pub fn any_weight() -> impl Strategy<Value = Weight> {
    (0u32..=MAX_WEIGHT_TENTHS).prop_map(|t| Weight::from_tenths(t).unwrap_or(Weight::ZERO))
}

/// A rated roster; `tied` picks the tie-heavy rating pool.
pub fn rated_roster(tied: bool) -> impl Strategy<Value = Roster> {
    let weight = if tied {
        tied_weight().boxed()
    } else {
        any_weight().boxed()
    };
    (names(), prop::collection::vec(weight, ROSTER_SIZE)).prop_map(|(names, weights)| {
        Roster::rated(names.into_iter().zip(weights)).unwrap_or(Roster::Rated(Vec::new()))
    })
}

/// Strength ordering from a rated roster.
pub fn strength_order() -> impl Strategy<Value = Vec<Participant>> {
    prop_oneof![rated_roster(true), rated_roster(false)]
        .prop_map(|roster| roster.strength_order().unwrap_or_default())
}
