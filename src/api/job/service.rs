use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sqlx::{Pool, Postgres};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::validation::ErrorResponse;
use crate::db::job_repository::JobRepository;
use crate::db::models::{JobDetail, JobListing, JobRow};
use crate::db::RepoError;
use super::models::{JobFilter, NewJob, UpdateJob};

/// Service-level errors
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Repo(RepoError::EmptyInput) => StatusCode::BAD_REQUEST,
            ServiceError::Repo(RepoError::NotFound(_)) => StatusCode::NOT_FOUND,
            ServiceError::Repo(RepoError::Reference(_)) => StatusCode::BAD_REQUEST,
            ServiceError::Repo(RepoError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let ServiceError::Repo(err) = self;
        let body = match err {
            RepoError::EmptyInput => {
                warn!("Rejected update with no fields");
                ErrorResponse::message("Bad request", "No data")
            }
            RepoError::NotFound(id) => {
                warn!("Job not found: {}", id);
                ErrorResponse::message("Not found", format!("No job: {}", id))
            }
            RepoError::Reference(e) => {
                warn!("Job references a missing company: {}", e);
                ErrorResponse::message("Bad request", "Company does not exist")
            }
            RepoError::Database(e) => {
                error!("Database error: {}", e);
                ErrorResponse::message("Failed to process request", "Database error occurred")
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Job service containing business logic
pub struct JobService {
    pool: Pool<Postgres>,
}

impl JobService {
    /// Create a new JobService instance
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn create_job(&self, job: &NewJob) -> Result<JobRow, ServiceError> {
        info!("Service: Creating job title={} company={}", job.title, job.company_handle);

        let row = JobRepository::create(&self.pool, job).await?;

        info!("Service: Job created successfully with id={}", row.id);
        Ok(row)
    }

    /// List jobs, narrowed by whichever filters are present
    pub async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobListing>, ServiceError> {
        let jobs = JobRepository::find_all(&self.pool, Some(filter)).await?;
        info!("Service: Listed {} jobs", jobs.len());
        Ok(jobs)
    }

    pub async fn get_job(&self, id: i32) -> Result<JobDetail, ServiceError> {
        Ok(JobRepository::get(&self.pool, id).await?)
    }

    /// Partially update a job
    ///
    /// # Returns
    /// - `Ok(JobRow)` - the job after the update
    /// - `Err(ServiceError)` - no fields given, or no such job
    pub async fn update_job(&self, id: i32, changes: &UpdateJob) -> Result<JobRow, ServiceError> {
        info!("Service: Updating job {}", id);

        let row = JobRepository::update(&self.pool, id, changes).await?;

        info!("Service: Job {} updated", id);
        Ok(row)
    }

    pub async fn delete_job(&self, id: i32) -> Result<(), ServiceError> {
        info!("Service: Deleting job {}", id);
        JobRepository::remove(&self.pool, id).await?;
        info!("Service: Job {} deleted", id);
        Ok(())
    }
}
