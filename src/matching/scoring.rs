use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::skill_normalizer::{normalize_skill, normalize_skill_set};

/// Overly generic terms that never earn extra-skill bonus points.
const GENERIC_SKILL_TERMS: &[&str] = &["software", "it", "technology"];

pub const BONUS_PER_EXTRA_SKILL: u32 = 2;
pub const MAX_BONUS_POINTS: u32 = 10;

/// Scored comparison between a candidate's skills and a job's requirements.
/// Recomputed on every request; never persisted or cached by the core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Final score, always an integer in [0, 100].
    pub score: u32,
    /// Job skills the candidate covers, title-cased, in job-skill order.
    pub matched_skills: Vec<String>,
    /// Job skills the candidate lacks, title-cased, in job-skill order.
    pub missing_skills: Vec<String>,
    /// Bonus-eligible candidate skills the job did not ask for,
    /// title-cased, in candidate order.
    pub extra_skills: Vec<String>,
    /// round(100 * matched / distinct job skills); 0 when no requirements.
    pub match_percentage: u32,
    pub bonus_points: u32,
}

/// Title-case one skill for display: lowercase, then capitalize every
/// letter starting a word ("node.js" -> "Node.Js").
fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for c in raw.trim().to_lowercase().chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Deduplicate a raw skill list by normalized token, keeping the first
/// spelling of each skill for display and the original order.
fn dedup_by_token(skills: &[String]) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for raw in skills {
        if raw.trim().is_empty() {
            continue;
        }
        let token = normalize_skill(raw);
        if seen.insert(token.clone()) {
            out.push((token, raw.clone()));
        }
    }
    out
}

/// Score how well a candidate's skill set satisfies a job's requirements.
///
/// A job skill is matched iff some candidate skill normalizes to the same
/// token (alias groups count as the same skill). Candidate skills the job
/// did not ask for earn capped bonus points unless they are generic terms.
/// Pure and deterministic; an empty requirement list scores 0 rather than
/// dividing by zero.
pub fn score_match(candidate_skills: &[String], job_skills: &[String]) -> MatchResult {
    let required = dedup_by_token(job_skills);
    if required.is_empty() {
        return MatchResult::default();
    }

    let candidate_tokens = normalize_skill_set(candidate_skills);

    let mut matched_skills = Vec::new();
    let mut missing_skills = Vec::new();
    let mut required_tokens = HashSet::new();
    for (token, raw) in &required {
        required_tokens.insert(token.clone());
        if candidate_tokens.contains(token) {
            matched_skills.push(title_case(raw));
        } else {
            missing_skills.push(title_case(raw));
        }
    }

    let extra_skills: Vec<String> = dedup_by_token(candidate_skills)
        .into_iter()
        .filter(|(token, _)| {
            !required_tokens.contains(token) && !GENERIC_SKILL_TERMS.contains(&token.as_str())
        })
        .map(|(_, raw)| title_case(&raw))
        .collect();

    let match_percentage =
        ((matched_skills.len() as f64 / required.len() as f64) * 100.0).round() as u32;
    let bonus_points = (extra_skills.len() as u32 * BONUS_PER_EXTRA_SKILL).min(MAX_BONUS_POINTS);
    let score = (match_percentage + bonus_points).min(100);

    MatchResult {
        score,
        matched_skills,
        missing_skills,
        extra_skills,
        match_percentage,
        bonus_points,
    }
}
