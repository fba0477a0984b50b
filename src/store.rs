use thiserror::Error;

use crate::Job;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("job not found: {0}")]
    NotFound(i64),
    #[error("job store backend error: {0}")]
    Backend(String),
}

/// Thin seam over whatever document store the surrounding system uses.
/// The core only ever needs a bounded batch of active jobs or one job by id;
/// query building and persistence live behind this trait, out of scope here.
pub trait JobStore {
    /// Active jobs, newest first, at most `limit` of them.
    fn active_jobs(&self, limit: usize) -> Result<Vec<Job>, StoreError>;

    fn job(&self, id: i64) -> Result<Job, StoreError>;
}

/// Reference collaborator backed by a plain Vec; used by tests and by
/// callers that already hold the job batch in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryJobStore {
    jobs: Vec<Job>,
}

impl InMemoryJobStore {
    pub fn new(jobs: Vec<Job>) -> Self {
        Self { jobs }
    }
}

impl JobStore for InMemoryJobStore {
    fn active_jobs(&self, limit: usize) -> Result<Vec<Job>, StoreError> {
        let mut jobs: Vec<Job> = self.jobs.iter().filter(|j| j.is_active).cloned().collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs.truncate(limit);
        Ok(jobs)
    }

    fn job(&self, id: i64) -> Result<Job, StoreError> {
        self.jobs
            .iter()
            .find(|j| j.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn job(id: i64, active: bool, day: u32) -> Job {
        Job {
            id,
            is_active: active,
            created_at: Some(Utc.with_ymd_and_hms(2026, 8, day, 0, 0, 0).unwrap()),
            ..Job::default()
        }
    }

    #[test]
    fn active_jobs_come_newest_first_and_capped() {
        let store = InMemoryJobStore::new(vec![job(1, true, 1), job(2, false, 2), job(3, true, 3)]);

        let jobs = store.active_jobs(10).unwrap();
        assert_eq!(jobs.iter().map(|j| j.id).collect::<Vec<_>>(), vec![3, 1]);

        let capped = store.active_jobs(1).unwrap();
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0].id, 3);
    }

    #[test]
    fn lookup_by_id_reports_missing_jobs() {
        let store = InMemoryJobStore::new(vec![job(7, true, 1)]);
        assert_eq!(store.job(7).unwrap().id, 7);
        assert!(matches!(store.job(8), Err(StoreError::NotFound(8))));
    }
}
