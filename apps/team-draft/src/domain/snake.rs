//! Snake (boustrophedon) draft over three groups.
//!
//! Picks go strongest first. Each round visits every group once, and the
//! visiting direction flips between rounds, so the group that picked first
//! in one round picks last in the next. A draft is parameterized by which
//! group the visiting order is rotated to start from and whether the first
//! round runs in reverse. That gives six deterministic candidates.

use crate::domain::composition::Draft;
use crate::domain::roster::Participant;
use crate::domain::rules::TEAM_COUNT;
use crate::domain::selection::select_best;

pub const VARIANT_COUNT: usize = TEAM_COUNT * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnakeVariant {
    pub start_group: usize,
    pub reverse_first_round: bool,
}

impl SnakeVariant {
    /// Enumeration order, which is also the tie-break order for selection.
    pub const ALL: [SnakeVariant; VARIANT_COUNT] = [
        SnakeVariant::new(0, false),
        SnakeVariant::new(0, true),
        SnakeVariant::new(1, false),
        SnakeVariant::new(1, true),
        SnakeVariant::new(2, false),
        SnakeVariant::new(2, true),
    ];

    pub const fn new(start_group: usize, reverse_first_round: bool) -> Self {
        Self {
            start_group,
            reverse_first_round,
        }
    }

    /// Group receiving the `pick`-th strongest participant (0-based).
    pub fn group_for_pick(self, pick: usize) -> usize {
        let round = pick / TEAM_COUNT;
        let position = pick % TEAM_COUNT;
        let forward = (round % 2 == 0) ^ self.reverse_first_round;
        let visited = if forward {
            position
        } else {
            TEAM_COUNT - 1 - position
        };
        (visited + self.start_group) % TEAM_COUNT
    }
}

/// Run one snake draft over a strongest-first ordering.
pub fn snake_draft(ordered: &[Participant], variant: SnakeVariant) -> Draft {
    let mut groups: [Vec<Participant>; TEAM_COUNT] = Default::default();
    for (pick, participant) in ordered.iter().enumerate() {
        groups[variant.group_for_pick(pick)].push(participant.clone());
    }
    Draft::from_groups(groups)
}

/// All six candidates, in [`SnakeVariant::ALL`] order.
pub fn snake_candidates(ordered: &[Participant]) -> [Draft; VARIANT_COUNT] {
    SnakeVariant::ALL.map(|variant| snake_draft(ordered, variant))
}

/// The best-balanced of the six candidates.
pub fn best_snake_draft(ordered: &[Participant]) -> Draft {
    let [first, rest @ ..] = snake_candidates(ordered);
    select_best(rest)
        .filter(|candidate| candidate.score < first.score)
        .unwrap_or(first)
}
