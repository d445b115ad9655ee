//! JSON-backed daily submission storage.

use anyhow::Result;

use super::{keys, JsonConnection};
use crate::domain::models::DailySubmission;
use crate::storage::traits::SubmissionStorage;
use crate::storage::upsert::upsert;

#[derive(Debug, Clone)]
pub struct SubmissionRepository {
    connection: JsonConnection,
}

impl SubmissionRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl SubmissionStorage for SubmissionRepository {
    fn upsert_submission(&self, submission: &DailySubmission) -> Result<()> {
        let submissions = self.connection.load_collection(keys::DAILY_SUBMISSIONS)?;
        let updated = upsert(
            submissions,
            submission.clone(),
            DailySubmission::upsert_key,
            keys::DAILY_SUBMISSIONS,
        )?;
        self.connection
            .save_collection(keys::DAILY_SUBMISSIONS, &updated)
    }

    fn list_submissions(&self) -> Result<Vec<DailySubmission>> {
        self.connection.load_collection(keys::DAILY_SUBMISSIONS)
    }

    fn list_submissions_for_month(&self, month: u32, year: i32) -> Result<Vec<DailySubmission>> {
        let submissions: Vec<DailySubmission> =
            self.connection.load_collection(keys::DAILY_SUBMISSIONS)?;
        Ok(submissions
            .into_iter()
            .filter(|s| s.is_in_month(month, year))
            .collect())
    }
}
