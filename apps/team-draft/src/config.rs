//! Runtime configuration read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `TEAM_DRAFT_NOVELTY_ATTEMPTS` | `80` |
//! | `TEAM_DRAFT_PERTURB_PROBABILITY` | `0.5` |
//! | `TEAM_DRAFT_RNG_SEED` | unset (OS entropy) |
//! | `TEAM_DRAFT_DEDUP_TTL_SECS` | `600` |
//! | `TEAM_DRAFT_DEDUP_CAPACITY` | `10000` |
//! | `TEAM_DRAFT_DUTY_STORE` | unset (in-memory) |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::domain::NoveltyPolicy;

pub const NOVELTY_ATTEMPTS_VAR: &str = "TEAM_DRAFT_NOVELTY_ATTEMPTS";
pub const PERTURB_PROBABILITY_VAR: &str = "TEAM_DRAFT_PERTURB_PROBABILITY";
pub const RNG_SEED_VAR: &str = "TEAM_DRAFT_RNG_SEED";
pub const DEDUP_TTL_VAR: &str = "TEAM_DRAFT_DEDUP_TTL_SECS";
pub const DEDUP_CAPACITY_VAR: &str = "TEAM_DRAFT_DEDUP_CAPACITY";
pub const DUTY_STORE_VAR: &str = "TEAM_DRAFT_DUTY_STORE";

const MAX_NOVELTY_ATTEMPTS: usize = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftConfig {
    pub novelty: NoveltyPolicy,
    /// Fixed seed for reproducible runs; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
    pub dedup_ttl: Duration,
    pub dedup_capacity: u64,
    /// JSON file for duty counts; `None` keeps them in memory.
    pub duty_store_path: Option<PathBuf>,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            novelty: NoveltyPolicy::default(),
            rng_seed: None,
            dedup_ttl: Duration::from_secs(600),
            dedup_capacity: 10_000,
            duty_store_path: None,
        }
    }
}

impl DraftConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from any variable lookup; unset or blank variables keep their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let max_attempts = match get(NOVELTY_ATTEMPTS_VAR) {
            Some(raw) => parse_in_range(
                NOVELTY_ATTEMPTS_VAR,
                &raw,
                "an integer between 1 and 1000",
                |n: &usize| (1..=MAX_NOVELTY_ATTEMPTS).contains(n),
            )?,
            None => defaults.novelty.max_attempts,
        };

        let perturb_probability = match get(PERTURB_PROBABILITY_VAR) {
            Some(raw) => parse_in_range(
                PERTURB_PROBABILITY_VAR,
                &raw,
                "a number between 0.0 and 1.0",
                |p: &f64| (0.0..=1.0).contains(p),
            )?,
            None => defaults.novelty.perturb_probability,
        };

        let rng_seed = get(RNG_SEED_VAR)
            .map(|raw| {
                parse_in_range(RNG_SEED_VAR, &raw, "an unsigned 64-bit integer", |_: &u64| true)
            })
            .transpose()?;

        let dedup_ttl = match get(DEDUP_TTL_VAR) {
            Some(raw) => Duration::from_secs(parse_in_range(
                DEDUP_TTL_VAR,
                &raw,
                "a positive number of seconds",
                |s: &u64| *s > 0,
            )?),
            None => defaults.dedup_ttl,
        };

        let dedup_capacity = match get(DEDUP_CAPACITY_VAR) {
            Some(raw) => parse_in_range(
                DEDUP_CAPACITY_VAR,
                &raw,
                "a positive integer",
                |c: &u64| *c > 0,
            )?,
            None => defaults.dedup_capacity,
        };

        Ok(Self {
            novelty: NoveltyPolicy {
                max_attempts,
                perturb_probability,
            },
            rng_seed,
            dedup_ttl,
            dedup_capacity,
            duty_store_path: get(DUTY_STORE_VAR).map(PathBuf::from),
        })
    }
}

fn parse_in_range<T, P>(
    var: &'static str,
    raw: &str,
    expected: &'static str,
    accept: P,
) -> Result<T, ConfigError>
where
    T: FromStr,
    P: Fn(&T) -> bool,
{
    raw.parse::<T>()
        .ok()
        .filter(|v| accept(v))
        .ok_or_else(|| ConfigError::Invalid {
            var,
            expected,
            value: raw.to_string(),
        })
}
