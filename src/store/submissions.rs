use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use crate::error::AppError;
use crate::models::Submission;

/// In-memory, append-only submission log. Contents live for the process lifetime.
#[derive(Default)]
pub struct SubmissionStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: u64,
    submissions: Vec<Submission>,
}

impl SubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, AppError> {
        self.inner
            .lock()
            .map_err(|_| AppError::Internal("submission store lock poisoned".to_string()))
    }

    /// Id assignment and append happen under one lock so concurrent writers
    /// never observe the same size.
    pub fn create(&self, name: String, text: String) -> Result<Submission, AppError> {
        let mut inner = self.lock()?;
        // Append-only, so the counter always equals the current size.
        inner.last_id += 1;

        let submission = Submission {
            id: inner.last_id,
            name,
            text,
            timestamp: Utc::now(),
        };
        inner.submissions.push(submission.clone());
        Ok(submission)
    }

    pub fn list(&self) -> Result<Vec<Submission>, AppError> {
        Ok(self.lock()?.submissions.clone())
    }

    pub fn find_by_id(&self, id: u64) -> Result<Option<Submission>, AppError> {
        Ok(self
            .lock()?
            .submissions
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }
}
