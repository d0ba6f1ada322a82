//! Per-roster metrics and the run summary.

use serde::Serialize;
use team_draft::BalanceScore;

use crate::simulator::RosterRun;

/// One output record per simulated roster. Flat so it fits a CSV row.
#[derive(Debug, Clone, Serialize)]
pub struct RosterMetrics {
    pub roster_no: u64,
    pub seed: u64,
    pub timestamp: String,
    pub mode: String,
    pub best_spread: Option<f64>,
    pub best_variance: Option<f64>,
    pub naive_spread: Option<f64>,
    pub reshuffles: u32,
    pub novel_reshuffles: u32,
    pub mean_attempts: Option<f64>,
    pub worst_reshuffle_spread: Option<f64>,
    pub distinct_signatures: usize,
}

fn spread_points(score: &BalanceScore) -> f64 {
    score.spread().as_f64()
}

/// Build metrics from one roster run.
pub fn build_roster_metrics(run: &RosterRun) -> RosterMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let reshuffles = run.reshuffles.len() as u32;
    let novel_reshuffles = run.reshuffles.iter().filter(|r| r.novel).count() as u32;
    let mean_attempts = (reshuffles > 0).then(|| {
        run.reshuffles.iter().map(|r| r.attempts as f64).sum::<f64>() / f64::from(reshuffles)
    });
    let worst_reshuffle_spread = run
        .reshuffles
        .iter()
        .filter_map(|r| r.score)
        .max_by_key(|score| score.spread())
        .map(|score| spread_points(&score));

    RosterMetrics {
        roster_no: run.roster_no,
        seed: run.seed,
        timestamp,
        mode: run.mode.to_string(),
        best_spread: run.first_score.as_ref().map(spread_points),
        best_variance: run.first_score.map(|s| s.variance()),
        naive_spread: run.naive_score.as_ref().map(spread_points),
        reshuffles,
        novel_reshuffles,
        mean_attempts,
        worst_reshuffle_spread,
        distinct_signatures: run.distinct_signatures,
    }
}

/// Aggregates printed at the end of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub rosters: usize,
    pub mean_best_spread: Option<f64>,
    pub mean_naive_spread: Option<f64>,
    pub worst_spread: Option<f64>,
    pub total_reshuffles: u32,
    pub novel_reshuffles: u32,
}

impl Summary {
    pub fn from_metrics(metrics: &[RosterMetrics]) -> Self {
        let mean = |values: Vec<f64>| {
            (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
        };
        let worst = metrics
            .iter()
            .flat_map(|m| m.best_spread.into_iter().chain(m.worst_reshuffle_spread))
            .fold(None, |acc: Option<f64>, s| Some(acc.map_or(s, |a| a.max(s))));

        Self {
            rosters: metrics.len(),
            mean_best_spread: mean(metrics.iter().filter_map(|m| m.best_spread).collect()),
            mean_naive_spread: mean(metrics.iter().filter_map(|m| m.naive_spread).collect()),
            worst_spread: worst,
            total_reshuffles: metrics.iter().map(|m| m.reshuffles).sum(),
            novel_reshuffles: metrics.iter().map(|m| m.novel_reshuffles).sum(),
        }
    }

    /// Share of reshuffles that produced an unseen composition, in percent.
    pub fn novelty_rate(&self) -> Option<f64> {
        (self.total_reshuffles > 0)
            .then(|| f64::from(self.novel_reshuffles) / f64::from(self.total_reshuffles) * 100.0)
    }
}
