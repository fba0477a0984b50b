pub mod pipeline;
pub mod scoring;

pub use pipeline::{
    trending_jobs, MatchingEngine, RankedJob, RankingConfig, Tier, TierBucket, TierBuckets,
    TrendingBy,
};
pub use scoring::{score_match, MatchResult};
