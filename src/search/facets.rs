use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::filter::{filter_jobs, FilterSpec};
use crate::skill_normalizer::normalize_skill_set;
use crate::Job;

const TOP_LOCATIONS: usize = 10;
const TOP_SKILLS: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryStats {
    pub min: u32,
    pub max: u32,
    pub avg: f64,
}

/// Aggregate statistics over a filtered job population. Always computed
/// over the exact same set the paginated search would return; never
/// pre-aggregated or cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetStats {
    pub total_jobs: usize,
    pub job_type_counts: BTreeMap<String, usize>,
    pub experience_level_counts: BTreeMap<String, usize>,
    /// Top 10 locations by listing count.
    pub top_locations: Vec<FacetCount>,
    /// Top 20 skills by frequency; each required-skill value counted once
    /// per job listing it appears in.
    pub top_skills: Vec<FacetCount>,
    pub salary: SalaryStats,
}

fn top_counts(counts: BTreeMap<String, usize>, limit: usize) -> Vec<FacetCount> {
    let mut ranked: Vec<FacetCount> = counts
        .into_iter()
        .map(|(value, count)| FacetCount { value, count })
        .collect();
    // BTreeMap iteration is alphabetical, so a stable sort by count keeps
    // ties in deterministic alphabetical order.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

/// Compute facet statistics for a filter spec over the job collection.
pub fn compute_facets(jobs: &[Job], spec: &FilterSpec) -> FacetStats {
    let population = filter_jobs(jobs, spec);

    let mut job_type_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut experience_level_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut location_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut skill_counts: BTreeMap<String, usize> = BTreeMap::new();

    let mut salary_min: Option<u32> = None;
    let mut salary_max: Option<u32> = None;
    let mut midpoint_sum = 0.0;

    for job in &population {
        *job_type_counts
            .entry(job.job_type.as_ref().to_string())
            .or_default() += 1;
        *experience_level_counts
            .entry(job.experience_level.as_ref().to_string())
            .or_default() += 1;

        let location = job.location.trim();
        if !location.is_empty() {
            *location_counts.entry(location.to_string()).or_default() += 1;
        }

        // Count each distinct skill value once per listing.
        let mut distinct: Vec<String> = job
            .required_skills
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        distinct.sort();
        distinct.dedup();
        for skill in distinct {
            *skill_counts.entry(skill).or_default() += 1;
        }

        salary_min = Some(salary_min.map_or(job.salary.min, |m| m.min(job.salary.min)));
        salary_max = Some(salary_max.map_or(job.salary.max, |m| m.max(job.salary.max)));
        midpoint_sum += (job.salary.min as f64 + job.salary.max as f64) / 2.0;
    }

    let total_jobs = population.len();
    let avg = if total_jobs == 0 {
        0.0
    } else {
        midpoint_sum / total_jobs as f64
    };

    FacetStats {
        total_jobs,
        job_type_counts,
        experience_level_counts,
        top_locations: top_counts(location_counts, TOP_LOCATIONS),
        top_skills: top_counts(skill_counts, TOP_SKILLS),
        salary: SalaryStats {
            min: salary_min.unwrap_or(0),
            max: salary_max.unwrap_or(0),
            avg,
        },
    }
}

/// Jobs similar to a reference posting: active, not the reference itself,
/// same job type, overlapping location and at least one shared required
/// skill. Location uses the same case-insensitive substring semantics as
/// the general search filter.
pub fn similar_jobs(reference: &Job, jobs: &[Job]) -> Vec<Job> {
    let reference_skills = normalize_skill_set(&reference.required_skills);
    let reference_location = reference.location.trim().to_lowercase();

    jobs.iter()
        .filter(|job| job.is_active && job.id != reference.id)
        .filter(|job| job.job_type == reference.job_type)
        .filter(|job| {
            job.location
                .to_lowercase()
                .contains(&reference_location)
        })
        .filter(|job| {
            !reference_skills.is_disjoint(&normalize_skill_set(&job.required_skills))
        })
        .cloned()
        .collect()
}
