use serde::Serialize;

use crate::db::models::JobListing;

/// Envelope for a single job (`JobRow` or `JobDetail`)
#[derive(Serialize)]
pub struct JobResponse<T> {
    pub job: T,
}

/// Envelope for a job listing
#[derive(Serialize)]
pub struct JobsResponse {
    pub jobs: Vec<JobListing>,
}

/// Response for a deleted job; the id is echoed back as a string
#[derive(Serialize)]
pub struct DeletedResponse {
    pub deleted: String,
}
