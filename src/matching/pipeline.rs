use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};
use tracing::debug;

use super::scoring::{score_match, MatchResult};
use crate::store::{JobStore, StoreError};
use crate::Job;

/// Match-score bucket a job falls into for display grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tier {
    High,
    Medium,
    Low,
}

/// Popularity field used for the skill-independent "trending" ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TrendingBy {
    #[default]
    Views,
    Applications,
}

#[derive(Debug, Clone)]
pub struct RankingConfig {
    /// Jobs scoring below this are dropped from rankings.
    pub min_score: u32,
    /// Tier boundaries: high >= tier_high, medium in [tier_medium, tier_high).
    pub tier_high: u32,
    pub tier_medium: u32,
    /// Cap on the candidate-job batch pulled through the store per request.
    pub batch_cap: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            min_score: env_min_score(),
            tier_high: 70,
            tier_medium: 40,
            batch_cap: 100,
        }
    }
}

fn env_min_score() -> u32 {
    std::env::var("JOBMATCH_MIN_SCORE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedJob {
    pub job: Job,
    pub result: MatchResult,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierBucket {
    /// Untruncated tier size; `jobs` may hold fewer entries for display.
    pub count: usize,
    pub jobs: Vec<RankedJob>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierBuckets {
    pub high: TierBucket,
    pub medium: TierBucket,
    pub low: TierBucket,
}

pub struct MatchingEngine {
    config: RankingConfig,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new(RankingConfig::default())
    }
}

impl MatchingEngine {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    pub fn tier_for(&self, score: u32) -> Tier {
        if score >= self.config.tier_high {
            Tier::High
        } else if score >= self.config.tier_medium {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    /// Score every job for the candidate, drop those below the configured
    /// floor and sort by score descending. The sort is stable, so ties keep
    /// the input order; the collaborator supplies jobs newest-first, which
    /// makes ties degrade to "newest first".
    pub fn rank_jobs(
        &self,
        candidate_skills: &[String],
        jobs: &[Job],
        limit: usize,
    ) -> Vec<RankedJob> {
        let mut ranked: Vec<RankedJob> = jobs
            .iter()
            .map(|job| RankedJob {
                result: score_match(candidate_skills, &job.required_skills),
                job: job.clone(),
            })
            .filter(|r| r.result.score >= self.config.min_score)
            .collect();

        ranked.sort_by(|a, b| b.result.score.cmp(&a.result.score));
        ranked.truncate(limit);
        ranked
    }

    /// Partition a ranked list into high/medium/low tiers. Each tier's job
    /// list is truncated to `display_limit`, but `count` always reports the
    /// untruncated tier size.
    pub fn bucket_by_tier(&self, ranked: Vec<RankedJob>, display_limit: usize) -> TierBuckets {
        let mut buckets = TierBuckets::default();

        for entry in ranked {
            let bucket = match self.tier_for(entry.result.score) {
                Tier::High => &mut buckets.high,
                Tier::Medium => &mut buckets.medium,
                Tier::Low => &mut buckets.low,
            };
            bucket.count += 1;
            if bucket.jobs.len() < display_limit {
                bucket.jobs.push(entry);
            }
        }

        buckets
    }

    /// Pull a capped batch of active jobs through the repository seam and
    /// rank it for the candidate.
    pub fn recommendations(
        &self,
        store: &dyn JobStore,
        candidate_skills: &[String],
        limit: usize,
    ) -> Result<Vec<RankedJob>, StoreError> {
        let jobs = store.active_jobs(self.config.batch_cap)?;
        debug!(
            batch = jobs.len(),
            min_score = self.config.min_score,
            "ranking candidate batch"
        );
        Ok(self.rank_jobs(candidate_skills, &jobs, limit))
    }
}

/// Order active jobs by a popularity counter, descending. Not skill-aware.
pub fn trending_jobs(jobs: &[Job], by: TrendingBy) -> Vec<Job> {
    let mut trending: Vec<Job> = jobs.iter().filter(|j| j.is_active).cloned().collect();
    trending.sort_by(|a, b| match by {
        TrendingBy::Views => b.views_count.cmp(&a.views_count),
        TrendingBy::Applications => b.applicants_count.cmp(&a.applicants_count),
    });
    trending
}
