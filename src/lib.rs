pub mod extraction;
pub mod logging;
pub mod matching;
pub mod search;
pub mod skill_normalizer;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

/// Employment form of a posting. Wire spelling is kebab-case ("full-time").
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Internship,
    Remote,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExperienceLevel {
    #[default]
    Entry,
    Mid,
    Senior,
    Lead,
}

/// Salary band as posted; the core never converts currencies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Salary {
    pub min: u32,
    pub max: u32,
    pub currency: String,
}

// Commonly used data models for the matching and search functions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    pub required_skills: Vec<String>,
    pub salary: Salary,
    pub application_deadline: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub applicants_count: u32,
    pub views_count: u32,
}

/// One candidate's resume as the collaborator hands it to the core:
/// the raw text plus the skill set produced by the last analysis run.
/// The skill set is rebuilt wholesale on each re-analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub id: i64,
    pub user_id: i64,
    pub text: String,
    pub skills: Vec<String>,
}
