use std::borrow::Cow;

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::db::sql::BindValue;

/// Request body for creating a job
#[derive(Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_new_job_equity"))]
pub struct NewJob {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(range(min = 0, message = "Salary must not be negative"))]
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    #[validate(length(
        min = 1,
        max = 25,
        message = "Company handle must be between 1 and 25 characters"
    ))]
    pub company_handle: String,
}

/// Request body for a partial job update.
///
/// `id` and `companyHandle` are deliberately not fields here, and unknown
/// keys are rejected, so neither can reach the `SET` clause.
#[derive(Deserialize, Debug, Clone, Default, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_update_job_equity"))]
pub struct UpdateJob {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(range(min = 0, message = "Salary must not be negative"))]
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

impl UpdateJob {
    /// Present fields as `(public name, value)`, in declaration order
    pub fn changes(&self) -> Vec<(&'static str, BindValue)> {
        let mut changes = Vec::new();
        if let Some(title) = &self.title {
            changes.push(("title", BindValue::Text(title.clone())));
        }
        if let Some(salary) = self.salary {
            changes.push(("salary", BindValue::Int(salary)));
        }
        if let Some(equity) = self.equity {
            changes.push(("equity", BindValue::Decimal(equity)));
        }
        changes
    }
}

/// Query-string filters for listing jobs
#[derive(Deserialize, Debug, Clone, Default, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    pub title: Option<String>,
    #[validate(range(min = 0, message = "minSalary must not be negative"))]
    pub min_salary: Option<i32>,
    pub has_equity: Option<bool>,
}

fn validate_new_job_equity(job: &NewJob) -> Result<(), ValidationError> {
    equity_in_range(job.equity)
}

fn validate_update_job_equity(job: &UpdateJob) -> Result<(), ValidationError> {
    equity_in_range(job.equity)
}

fn equity_in_range(equity: Option<Decimal>) -> Result<(), ValidationError> {
    match equity {
        Some(equity) if equity < Decimal::ZERO || equity > Decimal::ONE => {
            let mut err = ValidationError::new("equity_range");
            err.message = Some(Cow::from("Equity must be between 0 and 1"));
            Err(err)
        }
        _ => Ok(()),
    }
}
