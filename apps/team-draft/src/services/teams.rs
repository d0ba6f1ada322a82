//! Orchestration of roster submissions, reshuffles and duty completions.

use parking_lot::Mutex;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info, warn};

use crate::config::DraftConfig;
use crate::domain::{
    best_snake_draft, random_novel_partition, random_partition, select_new_balanced, BalanceScore,
    Composition, CompositionSignature, DutyRecord, NoveltyPolicy, Roster, RosterMode, Weight,
    TEAM_COUNT,
};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::services::dedup::CompletionDeduper;
use crate::services::duty_rotation::DutyRotation;
use crate::state::{RequesterId, SessionStore};
use crate::store::{DutyStore, JsonFileDutyStore, MemoryDutyStore};

/// What a requester gets back for a submission or a reshuffle.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSheet {
    pub mode: RosterMode,
    pub composition: Composition,
    /// Per-group rating totals; `None` for plain rosters.
    pub totals: Option<[Weight; TEAM_COUNT]>,
    pub score: Option<BalanceScore>,
    pub next_duty: Option<String>,
    pub signature: CompositionSignature,
    /// False when a reshuffle ran out of attempts and repeated itself.
    pub novel: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    Recorded { incremented: bool },
    Duplicate,
}

pub struct TeamService<S> {
    sessions: SessionStore,
    duty: DutyRotation<S>,
    dedup: CompletionDeduper,
    novelty: NoveltyPolicy,
    /// Never held across an await.
    rng: Mutex<ChaCha20Rng>,
}

impl TeamService<Box<dyn DutyStore>> {
    /// Service backed by the store the config points at: a JSON file when
    /// a path is set, memory otherwise.
    pub fn from_config(config: &DraftConfig) -> Self {
        let store: Box<dyn DutyStore> = match &config.duty_store_path {
            Some(path) => {
                info!(path = %path.display(), "Using JSON file duty store");
                Box::new(JsonFileDutyStore::new(path.clone()))
            }
            None => {
                info!("Using in-memory duty store");
                Box::new(MemoryDutyStore::new())
            }
        };
        Self::new(config, store)
    }
}

impl<S: DutyStore> TeamService<S> {
    pub fn new(config: &DraftConfig, store: S) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => {
                debug!(seed, "Seeding team service RNG");
                ChaCha20Rng::seed_from_u64(seed)
            }
            None => ChaCha20Rng::from_os_rng(),
        };
        Self {
            sessions: SessionStore::new(),
            duty: DutyRotation::new(store),
            dedup: CompletionDeduper::new(config.dedup_capacity, config.dedup_ttl),
            novelty: config.novelty,
            rng: Mutex::new(rng),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn duty(&self) -> &DutyRotation<S> {
        &self.duty
    }

    /// Partition a fresh roster and start a new session for `requester`.
    ///
    /// Plain rosters are split at random; rated and ranked rosters get the
    /// best snake draft. The next duty holder is picked once here and kept
    /// for every reshuffle of this roster.
    pub async fn submit(&self, requester: RequesterId, roster: Roster) -> TeamSheet {
        let record = self.duty.load_or_empty().await;

        let (draft_parts, next_duty) = {
            let mut rng = self.rng.lock();
            let parts = match roster.strength_order() {
                None => (random_partition(&roster.names(), &mut *rng), None),
                Some(ordered) => {
                    let draft = best_snake_draft(&ordered);
                    (draft.composition, Some((draft.totals, draft.score)))
                }
            };
            let next_duty = record
                .next_due(&roster.names(), &mut *rng)
                .map(str::to_string);
            (parts, next_duty)
        };
        let (composition, scored) = draft_parts;

        let mode = roster.mode();
        let signature = self.sessions.put(
            requester.clone(),
            roster,
            composition.clone(),
            next_duty.clone(),
        );

        info!(
            requester = %requester,
            mode = %mode,
            digest = signature.digest(),
            next_duty = next_duty.as_deref().unwrap_or("-"),
            "Roster partitioned"
        );

        TeamSheet {
            mode,
            composition,
            totals: scored.map(|(totals, _)| totals),
            score: scored.map(|(_, score)| score),
            next_duty,
            signature,
            novel: true,
        }
    }

    /// Produce a composition for the requester's last roster that has not
    /// been shown for it yet, if one turns up within the attempt budget.
    pub fn reshuffle(&self, requester: &RequesterId) -> Result<TeamSheet, DomainError> {
        let entry = self.sessions.get(requester).ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Session,
                format!("no roster submitted by {requester}"),
            )
        })?;

        let (composition, scored, novel, attempts) = {
            let mut rng = self.rng.lock();
            match entry.roster.strength_order() {
                None => {
                    let picked = random_novel_partition(
                        &entry.roster.names(),
                        &entry.seen,
                        self.novelty.max_attempts,
                        &mut *rng,
                    );
                    (picked.pick, None, picked.novel, picked.attempts)
                }
                Some(ordered) => {
                    let picked =
                        select_new_balanced(&ordered, &entry.seen, &self.novelty, &mut *rng);
                    let draft = picked.pick;
                    (
                        draft.composition,
                        Some((draft.totals, draft.score)),
                        picked.novel,
                        picked.attempts,
                    )
                }
            }
        };

        let seen = self
            .sessions
            .record_shuffle(requester, composition.clone())
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Session,
                    format!("session for {requester} ended during reshuffle"),
                )
            })?;
        let signature = composition.signature();

        if novel {
            info!(requester = %requester, attempts, seen, "Reshuffled roster");
        } else {
            warn!(
                requester = %requester,
                attempts,
                seen,
                "No unseen composition within budget, repeating"
            );
        }

        Ok(TeamSheet {
            mode: entry.mode(),
            composition,
            totals: scored.map(|(totals, _)| totals),
            score: scored.map(|(_, score)| score),
            next_duty: entry.next_duty,
            signature,
            novel,
        })
    }

    /// Record that `identifier` took the duty, once per `event_key`.
    ///
    /// A failed save lets the same event key through again so the caller
    /// can retry.
    pub async fn complete_duty(
        &self,
        event_key: &str,
        identifier: &str,
    ) -> Result<CompletionOutcome, DomainError> {
        if identifier.trim().is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptyIdentifier,
                "duty completion without a name",
            ));
        }
        if !self.dedup.first_sighting(event_key).await {
            return Ok(CompletionOutcome::Duplicate);
        }

        match self.duty.record_completion(identifier).await {
            Ok(incremented) => Ok(CompletionOutcome::Recorded { incremented }),
            Err(err) => {
                self.dedup.forget(event_key).await;
                Err(err)
            }
        }
    }

    /// Non-zero counts, least frequent first.
    pub async fn duty_history(&self) -> Vec<(String, u32)> {
        self.duty.history().await
    }

    pub async fn duty_record(&self) -> DutyRecord {
        self.duty.snapshot().await
    }
}
