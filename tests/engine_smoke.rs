//! End-to-end flow: resume text -> extracted skills -> ranked jobs ->
//! filtered search with facets, the way the API layer drives the core.

use chrono::{TimeZone, Utc};
use jobmatch::extraction::extract_resume_fields;
use jobmatch::matching::{MatchingEngine, RankingConfig};
use jobmatch::search::{compute_facets, search_jobs, FilterSpec, Pagination, SortKey};
use jobmatch::store::InMemoryJobStore;
use jobmatch::{ExperienceLevel, Job, JobType, Resume, Salary};

const RESUME: &str = "\
Jane Smith
jane.smith@example.com | +1 (555) 987-6543

Passionate backend developer experienced in building data-heavy platforms.

EXPERIENCE
• Software Engineer at Initech Technologies, June 2021 - Present
• Junior Developer, Globex Corp, 2018-2021

EDUCATION
• Bachelor of Engineering, Technical University, 2014-2018

SKILLS
JavaScript, Node.js, MongoDB, Docker
";

fn job(id: i64, title: &str, job_type: JobType, skills: &[&str], min_salary: u32) -> Job {
    Job {
        id,
        title: title.into(),
        company: "Initech".into(),
        description: "Build and operate backend services".into(),
        location: "Remote, Europe".into(),
        job_type,
        experience_level: ExperienceLevel::Mid,
        required_skills: skills.iter().map(|s| s.to_string()).collect(),
        salary: Salary {
            min: min_salary,
            max: min_salary + 30_000,
            currency: "EUR".into(),
        },
        created_at: Some(Utc.with_ymd_and_hms(2026, 7, (id % 28) as u32 + 1, 0, 0, 0).unwrap()),
        is_active: true,
        ..Job::default()
    }
}

fn job_board() -> Vec<Job> {
    vec![
        job(1, "Node Backend Engineer", JobType::Remote, &["node.js", "mongodb", "docker"], 60_000),
        job(2, "Platform Engineer", JobType::Remote, &["kubernetes", "terraform", "ansible"], 80_000),
        job(3, "Frontend Developer", JobType::FullTime, &["javascript", "react", "css"], 45_000),
        job(4, "Data Analyst", JobType::PartTime, &["sql", "python"], 40_000),
    ]
}

#[test]
fn resume_to_recommendations_flow() {
    let fields = extract_resume_fields(RESUME);
    assert!(fields.skills.contains(&"Node.js".to_string()));
    assert!(fields.skills.contains(&"MongoDB".to_string()));
    assert_eq!(fields.education.len(), 1);
    assert_eq!(fields.experience.len(), 2);
    assert_ne!(fields.summary, "");

    // Re-analysis replaces the resume's skill set wholesale before ranking.
    let resume = Resume {
        id: 1,
        user_id: 42,
        text: RESUME.into(),
        skills: fields.skills.clone(),
    };

    let store = InMemoryJobStore::new(job_board());
    let engine = MatchingEngine::new(RankingConfig {
        min_score: 30,
        ..RankingConfig::default()
    });

    let ranked = engine
        .recommendations(&store, &resume.skills, 10)
        .expect("in-memory store cannot fail");

    assert!(!ranked.is_empty());
    assert_eq!(ranked[0].job.id, 1);
    assert_eq!(ranked[0].result.match_percentage, 100);
    assert!(ranked
        .windows(2)
        .all(|w| w[0].result.score >= w[1].result.score));
    // The platform job shares no skills and sits under the floor.
    assert!(ranked.iter().all(|r| r.job.id != 2));
}

#[test]
fn search_and_facets_agree_on_the_population() {
    let jobs = job_board();
    let spec = FilterSpec {
        job_type: Some(JobType::Remote),
        min_salary: Some(50_000),
        sort: SortKey::SalaryHigh,
        pagination: Pagination {
            page: 1,
            page_size: 10,
        },
        ..FilterSpec::default()
    };

    let page = search_jobs(&jobs, &spec);
    let stats = compute_facets(&jobs, &spec);

    assert_eq!(page.total, 2);
    assert_eq!(stats.total_jobs, page.total);
    assert_eq!(stats.job_type_counts.get("remote"), Some(&2));
    assert_eq!(stats.job_type_counts.len(), 1);
    assert!(page.items.iter().all(|j| j.is_active
        && j.job_type == JobType::Remote
        && j.salary.min >= 50_000));
    assert_eq!(page.items[0].id, 2);
}

#[test]
fn results_serialize_for_the_api_layer() {
    let fields = extract_resume_fields(RESUME);
    let engine = MatchingEngine::default();
    let ranked = engine.rank_jobs(&fields.skills, &job_board(), 5);

    let json = serde_json::to_value(&ranked).expect("ranked jobs serialize");
    let first = &json[0];
    assert!(first["result"]["score"].is_u64());
    assert!(first["result"]["matched_skills"].is_array());
    assert_eq!(first["job"]["job_type"], "remote");

    let stats = compute_facets(&job_board(), &FilterSpec::default());
    let json = serde_json::to_value(&stats).expect("facets serialize");
    assert_eq!(json["total_jobs"], 4);
}
