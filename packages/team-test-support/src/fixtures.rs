//! Roster fixtures shared by unit and integration tests.

/// Fifteen distinct display names, including a couple with diacritics.
pub const NAMES: [&str; 15] = [
    "Amrit", "Bea", "Chidi", "Dana", "Émile", "Farid", "Gosia", "Hana", "Ivo", "Jun", "Kofi",
    "Lena", "Mateo", "Nia", "Oskar",
];

/// Ratings matching the balanced-draft scenario, strongest first.
pub const SCENARIO_RATINGS: [&str; 15] = [
    "9", "8", "8", "7", "7", "7", "6", "6", "6", "6", "5", "5", "5", "4", "3",
];

/// The fixture names as owned strings.
pub fn names() -> Vec<String> {
    NAMES.iter().map(|n| n.to_string()).collect()
}

/// Names paired with the scenario ratings, in the given order.
pub fn rated_pairs() -> Vec<(String, String)> {
    NAMES
        .iter()
        .zip(SCENARIO_RATINGS.iter())
        .map(|(n, r)| (n.to_string(), r.to_string()))
        .collect()
}
