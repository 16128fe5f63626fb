use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::api::job::{JobFilter, NewJob, UpdateJob};
use crate::db::error::RepoError;
use crate::db::models::{JobDetail, JobListing, JobRow};
use crate::db::sql::{
    bind_values, sql_for_partial_update, BindValue, FieldNameMap, FilterBuilder, SqlFragment,
};

/// Columns returned for a bare job row; equity is read as text to keep its scale
const JOB_COLUMNS: &str = "id, title, salary, equity::TEXT AS equity, company_handle";

/// Every updatable job field shares its column name
pub const JOB_FIELD_NAMES: FieldNameMap = &[];

/// Repository for Job database operations
pub struct JobRepository;

impl JobRepository {
    /// Build the `WHERE` clause for a job listing.
    ///
    /// Predicates are added in a fixed order (title, minSalary, hasEquity).
    /// `title` is a case-insensitive literal substring: `%` and `_` in it are
    /// escaped, so `title=%` matches only titles containing a percent sign.
    /// `hasEquity: false` adds nothing.
    pub fn filter_clause(filter: Option<&JobFilter>) -> SqlFragment {
        let mut builder = FilterBuilder::new();

        if let Some(filter) = filter {
            if let Some(title) = &filter.title {
                builder.contains_ci("title", title);
            }
            if let Some(min_salary) = filter.min_salary {
                builder.at_least("salary", BindValue::Int(min_salary));
            }
            if filter.has_equity == Some(true) {
                builder.greater_than("equity", BindValue::Decimal(Decimal::ZERO));
            }
        }

        builder.build()
    }

    /// Insert a new job and return the stored row
    ///
    /// # Errors
    /// - `RepoError::Reference` if `company_handle` names no company
    pub async fn create(pool: &Pool<Postgres>, job: &NewJob) -> Result<JobRow, RepoError> {
        debug!("Creating job: title={}, company={}", job.title, job.company_handle);

        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3::NUMERIC, $4) \
             RETURNING {JOB_COLUMNS}"
        );

        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(&job.title)
            .bind(job.salary)
            .bind(job.equity.map(|equity| equity.to_string()))
            .bind(&job.company_handle)
            .fetch_one(pool)
            .await?;

        debug!("Job created with id={}", row.id);
        Ok(row)
    }

    /// List jobs matching `filter`, ordered by title
    pub async fn find_all(
        pool: &Pool<Postgres>,
        filter: Option<&JobFilter>,
    ) -> Result<Vec<JobListing>, RepoError> {
        let filter = Self::filter_clause(filter);
        let where_sql = if filter.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", filter.clause)
        };

        let sql = format!(
            "SELECT j.id, j.title, j.salary, j.equity::TEXT AS equity, j.company_handle, \
                    c.name AS company_name \
             FROM jobs j \
             JOIN companies c ON j.company_handle = c.handle \
             {where_sql} \
             ORDER BY j.title, j.id"
        );
        debug!("Listing jobs: {} filter values", filter.values.len());

        let rows = bind_values(sqlx::query_as::<_, JobListing>(&sql), &filter.values)
            .fetch_all(pool)
            .await?;

        Ok(rows)
    }

    /// Fetch one job with its full company record
    ///
    /// # Errors
    /// - `RepoError::NotFound` if no job has this id
    pub async fn get(pool: &Pool<Postgres>, id: i32) -> Result<JobDetail, RepoError> {
        sqlx::query_as::<_, JobDetail>(
            r#"
            SELECT j.id, j.title, j.salary, j.equity::TEXT AS equity,
                   c.handle, c.name, c.num_employees, c.description, c.logo_url
            FROM jobs j
            JOIN companies c ON j.company_handle = c.handle
            WHERE j.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(RepoError::NotFound(id))
    }

    /// Apply a partial update and return the updated row
    ///
    /// # Errors
    /// - `RepoError::EmptyInput` if `changes` has no fields set
    /// - `RepoError::NotFound` if no job has this id
    pub async fn update(
        pool: &Pool<Postgres>,
        id: i32,
        changes: &UpdateJob,
    ) -> Result<JobRow, RepoError> {
        let set = sql_for_partial_update(changes.changes(), JOB_FIELD_NAMES)?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {JOB_COLUMNS}",
            set.clause,
            set.next_placeholder()
        );
        debug!("Updating job {}: {}", id, set.clause);

        bind_values(sqlx::query_as::<_, JobRow>(&sql), &set.values)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or(RepoError::NotFound(id))
    }

    /// Delete a job
    ///
    /// # Errors
    /// - `RepoError::NotFound` if no job has this id
    pub async fn remove(pool: &Pool<Postgres>, id: i32) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(id));
        }

        debug!("Job {} deleted", id);
        Ok(())
    }
}
