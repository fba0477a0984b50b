use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, EnumString};

use crate::{ExperienceLevel, Job, JobType};

pub const MAX_PAGE_SIZE: u32 = 50;

/// Enumerated sort orders for job listings. Unknown keys from the HTTP
/// layer fall back to `Newest` rather than rejecting the request.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    SalaryHigh,
    SalaryLow,
    TitleAsc,
    TitleDesc,
    CompanyAsc,
    CompanyDesc,
    ApplicantsHigh,
    ApplicantsLow,
    ViewsHigh,
    ViewsLow,
}

impl SortKey {
    /// Parse a raw sort key, defaulting to `Newest` for anything unknown.
    pub fn parse(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

fn sort_key_or_default<'de, D>(deserializer: D) -> Result<SortKey, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(SortKey::parse).unwrap_or_default())
}

/// Unknown enum filter values drop the filter instead of rejecting the
/// whole request, same lenient path as the sort key.
fn filter_value_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

/// Pagination parameters for job listings. Values are always clamped
/// before computing skip/limit: page >= 1, page_size in [1, MAX_PAGE_SIZE].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl Pagination {
    pub fn clamped(self) -> Self {
        Self {
            page: self.page.max(1),
            page_size: self.page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn skip(self) -> usize {
        let clamped = self.clamped();
        (clamped.page as usize - 1) * clamped.page_size as usize
    }
}

/// One search request's filters and sort key. Immutable value object;
/// maps 1:1 to a pass over the job collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Free-text term matched against title, description and company
    /// (and location too when `search_location` is set, the simple
    /// listing variant). Substring semantics, case-insensitive.
    pub search: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "filter_value_or_none")]
    pub job_type: Option<JobType>,
    #[serde(default, deserialize_with = "filter_value_or_none")]
    pub experience_level: Option<ExperienceLevel>,
    /// AND semantics: every entry must be covered by some required skill
    /// (case-insensitive substring match).
    #[serde(default)]
    pub skills: Vec<String>,
    pub min_salary: Option<u32>,
    pub max_salary: Option<u32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub deadline_after: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "sort_key_or_default")]
    pub sort: SortKey,
    #[serde(default)]
    pub pagination: Pagination,
    /// Administrative collaborators may see inactive jobs.
    #[serde(default)]
    pub include_inactive: bool,
    #[serde(default)]
    pub search_location: bool,
}

/// One page of results; `total` and `pages` always describe the full
/// filtered set, not the returned slice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
    pub pages: u32,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches(job: &Job, spec: &FilterSpec) -> bool {
    if !spec.include_inactive && !job.is_active {
        return false;
    }

    if let Some(term) = spec.search.as_deref().filter(|t| !t.trim().is_empty()) {
        let hit = contains_ci(&job.title, term)
            || contains_ci(&job.description, term)
            || contains_ci(&job.company, term)
            || (spec.search_location && contains_ci(&job.location, term));
        if !hit {
            return false;
        }
    }

    if let Some(location) = spec.location.as_deref().filter(|l| !l.trim().is_empty()) {
        if !contains_ci(&job.location, location) {
            return false;
        }
    }

    if let Some(job_type) = spec.job_type {
        if job.job_type != job_type {
            return false;
        }
    }

    if let Some(level) = spec.experience_level {
        if job.experience_level != level {
            return false;
        }
    }

    for wanted in spec.skills.iter().filter(|s| !s.trim().is_empty()) {
        if !job
            .required_skills
            .iter()
            .any(|have| contains_ci(have, wanted))
        {
            return false;
        }
    }

    if let Some(min) = spec.min_salary {
        if job.salary.min < min {
            return false;
        }
    }
    if let Some(max) = spec.max_salary {
        if job.salary.max > max {
            return false;
        }
    }

    if let Some(start) = spec.start_date {
        match job.created_at {
            Some(created) if created >= start => {}
            _ => return false,
        }
    }
    if let Some(end) = spec.end_date {
        match job.created_at {
            Some(created) if created <= end => {}
            _ => return false,
        }
    }
    if let Some(deadline) = spec.deadline_after {
        match job.application_deadline {
            Some(d) if d >= deadline => {}
            _ => return false,
        }
    }

    true
}

/// Apply every filter of the spec over the collection. This is the single
/// filtered population both the paginated search and the facet statistics
/// are computed from.
pub fn filter_jobs<'a>(jobs: &'a [Job], spec: &FilterSpec) -> Vec<&'a Job> {
    jobs.iter().filter(|job| matches(job, spec)).collect()
}

pub fn sort_jobs(jobs: &mut [&Job], key: SortKey) {
    match key {
        SortKey::Newest => jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Oldest => jobs.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::SalaryHigh => jobs.sort_by(|a, b| b.salary.max.cmp(&a.salary.max)),
        SortKey::SalaryLow => jobs.sort_by(|a, b| a.salary.min.cmp(&b.salary.min)),
        SortKey::TitleAsc => {
            jobs.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
        SortKey::TitleDesc => {
            jobs.sort_by(|a, b| b.title.to_lowercase().cmp(&a.title.to_lowercase()))
        }
        SortKey::CompanyAsc => {
            jobs.sort_by(|a, b| a.company.to_lowercase().cmp(&b.company.to_lowercase()))
        }
        SortKey::CompanyDesc => {
            jobs.sort_by(|a, b| b.company.to_lowercase().cmp(&a.company.to_lowercase()))
        }
        SortKey::ApplicantsHigh => jobs.sort_by(|a, b| b.applicants_count.cmp(&a.applicants_count)),
        SortKey::ApplicantsLow => jobs.sort_by(|a, b| a.applicants_count.cmp(&b.applicants_count)),
        SortKey::ViewsHigh => jobs.sort_by(|a, b| b.views_count.cmp(&a.views_count)),
        SortKey::ViewsLow => jobs.sort_by(|a, b| a.views_count.cmp(&b.views_count)),
    }
}

/// Filter, sort and paginate in one pass over the collection.
pub fn search_jobs(jobs: &[Job], spec: &FilterSpec) -> Page<Job> {
    let mut filtered = filter_jobs(jobs, spec);
    sort_jobs(&mut filtered, spec.sort);

    let pagination = spec.pagination.clamped();
    let total = filtered.len();
    let pages = (total as u32).div_ceil(pagination.page_size);

    let items = filtered
        .into_iter()
        .skip(pagination.skip())
        .take(pagination.page_size as usize)
        .cloned()
        .collect();

    Page {
        items,
        total,
        page: pagination.page,
        page_size: pagination.page_size,
        pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Salary;
    use chrono::TimeZone;

    fn job(id: i64) -> Job {
        Job {
            id,
            title: format!("Backend Engineer {id}"),
            company: "Initech".into(),
            description: "Ship reliable services".into(),
            location: "Berlin, Germany".into(),
            job_type: JobType::FullTime,
            experience_level: ExperienceLevel::Mid,
            required_skills: vec!["Rust".into(), "PostgreSQL".into()],
            salary: Salary {
                min: 60_000,
                max: 90_000,
                currency: "EUR".into(),
            },
            created_at: Some(Utc.with_ymd_and_hms(2026, 1, (id % 28) as u32 + 1, 0, 0, 0).unwrap()),
            is_active: true,
            ..Job::default()
        }
    }

    #[test]
    fn unknown_sort_keys_fall_back_to_newest() {
        assert_eq!(SortKey::parse("salaryHigh"), SortKey::SalaryHigh);
        assert_eq!(SortKey::parse("viewsLow"), SortKey::ViewsLow);
        assert_eq!(SortKey::parse("definitely-not-a-key"), SortKey::Newest);
        assert_eq!(SortKey::parse(""), SortKey::Newest);
    }

    #[test]
    fn filter_spec_deserializes_with_sort_fallback() {
        let spec: FilterSpec =
            serde_json::from_str(r#"{"search":"rust","sort":"bogus"}"#).unwrap();
        assert_eq!(spec.sort, SortKey::Newest);
        assert_eq!(spec.pagination, Pagination::default());

        let spec: FilterSpec = serde_json::from_str(r#"{"sort":"titleAsc"}"#).unwrap();
        assert_eq!(spec.sort, SortKey::TitleAsc);
    }

    #[test]
    fn unknown_filter_values_drop_the_filter_not_the_request() {
        let spec: FilterSpec =
            serde_json::from_str(r#"{"job_type":"bogus","experience_level":"wizard"}"#).unwrap();
        assert_eq!(spec.job_type, None);
        assert_eq!(spec.experience_level, None);

        let spec: FilterSpec =
            serde_json::from_str(r#"{"job_type":"part-time","experience_level":"senior"}"#)
                .unwrap();
        assert_eq!(spec.job_type, Some(JobType::PartTime));
        assert_eq!(spec.experience_level, Some(ExperienceLevel::Senior));
    }

    #[test]
    fn inactive_jobs_are_hidden_unless_admin() {
        let mut inactive = job(1);
        inactive.is_active = false;
        let jobs = vec![inactive, job(2)];

        let spec = FilterSpec::default();
        assert_eq!(filter_jobs(&jobs, &spec).len(), 1);

        let admin = FilterSpec {
            include_inactive: true,
            ..FilterSpec::default()
        };
        assert_eq!(filter_jobs(&jobs, &admin).len(), 2);
    }

    #[test]
    fn text_search_covers_title_description_and_company() {
        let mut by_company = job(1);
        by_company.company = "Globex Robotics".into();
        let mut by_location = job(2);
        by_location.title = "Data Analyst".into();
        by_location.description = "Dashboards".into();
        by_location.company = "Acme".into();
        by_location.location = "Robotics Valley".into();
        let jobs = vec![by_company, by_location];

        let spec = FilterSpec {
            search: Some("robotics".into()),
            ..FilterSpec::default()
        };
        assert_eq!(filter_jobs(&jobs, &spec).len(), 1);

        let listing = FilterSpec {
            search: Some("robotics".into()),
            search_location: true,
            ..FilterSpec::default()
        };
        assert_eq!(filter_jobs(&jobs, &listing).len(), 2);
    }

    #[test]
    fn skills_filter_uses_and_semantics() {
        let jobs = vec![job(1)];

        let both = FilterSpec {
            skills: vec!["rust".into(), "postgres".into()],
            ..FilterSpec::default()
        };
        assert_eq!(filter_jobs(&jobs, &both).len(), 1);

        let one_missing = FilterSpec {
            skills: vec!["rust".into(), "kafka".into()],
            ..FilterSpec::default()
        };
        assert!(filter_jobs(&jobs, &one_missing).is_empty());
    }

    #[test]
    fn salary_bounds_filter_min_and_max() {
        let jobs = vec![job(1)];

        let affordable = FilterSpec {
            min_salary: Some(50_000),
            ..FilterSpec::default()
        };
        assert_eq!(filter_jobs(&jobs, &affordable).len(), 1);

        let too_demanding = FilterSpec {
            min_salary: Some(70_000),
            ..FilterSpec::default()
        };
        assert!(filter_jobs(&jobs, &too_demanding).is_empty());

        let capped = FilterSpec {
            max_salary: Some(80_000),
            ..FilterSpec::default()
        };
        assert!(filter_jobs(&jobs, &capped).is_empty());
    }

    #[test]
    fn date_filters_use_creation_and_deadline() {
        let mut with_deadline = job(1);
        with_deadline.application_deadline =
            Some(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap());
        let jobs = vec![with_deadline, job(2)];

        let spec = FilterSpec {
            deadline_after: Some(Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap()),
            ..FilterSpec::default()
        };
        // Jobs without a deadline never satisfy deadline_after.
        assert_eq!(filter_jobs(&jobs, &spec).len(), 1);

        let windowed = FilterSpec {
            start_date: Some(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()),
            end_date: Some(Utc.with_ymd_and_hms(2026, 1, 31, 23, 59, 59).unwrap()),
            ..FilterSpec::default()
        };
        assert_eq!(filter_jobs(&jobs, &windowed).len(), 2);
    }

    #[test]
    fn pagination_is_clamped_and_pages_derived_from_total() {
        let jobs: Vec<Job> = (1..=25).map(job).collect();

        let spec = FilterSpec {
            pagination: Pagination {
                page: 0,
                page_size: 500,
            },
            ..FilterSpec::default()
        };
        let page = search_jobs(&jobs, &spec);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, MAX_PAGE_SIZE);
        assert_eq!(page.total, 25);
        assert_eq!(page.pages, 1);
    }

    #[test]
    fn pages_never_overlap_for_the_same_filter_and_sort() {
        let jobs: Vec<Job> = (1..=25).map(job).collect();

        let page_of = |n: u32| {
            search_jobs(
                &jobs,
                &FilterSpec {
                    sort: SortKey::TitleAsc,
                    pagination: Pagination {
                        page: n,
                        page_size: 10,
                    },
                    ..FilterSpec::default()
                },
            )
        };

        let first = page_of(1);
        let second = page_of(2);
        let third = page_of(3);

        assert_eq!(first.pages, 3);
        assert_eq!(first.items.len(), 10);
        assert_eq!(third.items.len(), 5);

        let first_ids: Vec<i64> = first.items.iter().map(|j| j.id).collect();
        assert!(second.items.iter().all(|j| !first_ids.contains(&j.id)));
    }

    #[test]
    fn sort_orders_are_honored() {
        let mut cheap = job(1);
        cheap.salary = Salary {
            min: 40_000,
            max: 50_000,
            currency: "EUR".into(),
        };
        let mut rich = job(2);
        rich.salary = Salary {
            min: 100_000,
            max: 140_000,
            currency: "EUR".into(),
        };
        let jobs = vec![cheap, rich];

        let high_first = search_jobs(
            &jobs,
            &FilterSpec {
                sort: SortKey::SalaryHigh,
                ..FilterSpec::default()
            },
        );
        assert_eq!(high_first.items[0].id, 2);

        let low_first = search_jobs(
            &jobs,
            &FilterSpec {
                sort: SortKey::SalaryLow,
                ..FilterSpec::default()
            },
        );
        assert_eq!(low_first.items[0].id, 1);
    }
}
