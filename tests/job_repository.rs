//! Integration tests for the job repository against a real database.
//!
//! Every test starts from `fixtures/jobs.sql`: companies c1..c4 and jobs
//! j1 (id 1, c1, equity 0.0), j2 (id 2, c2, 0.2), j3 (id 3, c3, 0.3).

use job_board::api::job::{JobFilter, NewJob, UpdateJob};
use job_board::db::models::JobListing;
use job_board::db::{JobRepository, RepoError};
use rust_decimal::Decimal;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn dec(raw: &str) -> Decimal {
    raw.parse().unwrap()
}

fn titles(jobs: &[JobListing]) -> Vec<&str> {
    jobs.iter().map(|job| job.title.as_str()).collect()
}

fn new_job(title: &str, company_handle: &str) -> NewJob {
    NewJob {
        title: title.to_string(),
        salary: Some(10_000),
        equity: Some(dec("0.1")),
        company_handle: company_handle.to_string(),
    }
}

// ---------------------------------------------------------------------------
// create
// ---------------------------------------------------------------------------

#[sqlx::test(fixtures("jobs"))]
async fn create_returns_stored_row(pool: PgPool) {
    let job = JobRepository::create(&pool, &new_job("Test Job", "c1"))
        .await
        .unwrap();

    assert_eq!(job.id, 4);
    assert_eq!(job.title, "Test Job");
    assert_eq!(job.salary, Some(10_000));
    assert_eq!(job.equity.as_deref(), Some("0.1"));
    assert_eq!(job.company_handle, "c1");
}

#[sqlx::test(fixtures("jobs"))]
async fn create_with_unknown_company_is_reference_error(pool: PgPool) {
    let err = JobRepository::create(&pool, &new_job("Orphan", "nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Reference(_)), "{err:?}");
}

#[sqlx::test(fixtures("jobs"))]
async fn create_then_list_by_title(pool: PgPool) {
    let created = JobRepository::create(
        &pool,
        &NewJob {
            title: "fresh".to_string(),
            salary: Some(1000),
            equity: Some(dec("0.0")),
            company_handle: "c1".to_string(),
        },
    )
    .await
    .unwrap();

    let filter = JobFilter {
        title: Some("fresh".to_string()),
        ..JobFilter::default()
    };
    let jobs = JobRepository::find_all(&pool, Some(&filter)).await.unwrap();

    assert_eq!(
        jobs,
        vec![JobListing {
            id: created.id,
            title: "fresh".to_string(),
            salary: Some(1000),
            equity: Some("0.0".to_string()),
            company_handle: "c1".to_string(),
            company_name: "C1".to_string(),
        }]
    );
}

#[sqlx::test(fixtures("jobs"))]
async fn zero_equity_keeps_its_scale_on_every_read(pool: PgPool) {
    let created = JobRepository::create(
        &pool,
        &NewJob {
            title: "rt".to_string(),
            salary: Some(1000),
            equity: Some(dec("0.0")),
            company_handle: "c1".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(
        serde_json::to_value(&created).unwrap()["equity"],
        serde_json::json!("0.0")
    );

    let filter = JobFilter {
        title: Some("rt".to_string()),
        ..JobFilter::default()
    };
    let listed = JobRepository::find_all(&pool, Some(&filter)).await.unwrap();
    assert_eq!(
        serde_json::to_value(&listed).unwrap()[0]["equity"],
        serde_json::json!("0.0")
    );

    let fetched = JobRepository::get(&pool, created.id).await.unwrap();
    assert_eq!(fetched.equity.as_deref(), Some("0.0"));

    let changes = UpdateJob {
        equity: Some(dec("0.00")),
        ..UpdateJob::default()
    };
    let updated = JobRepository::update(&pool, created.id, &changes)
        .await
        .unwrap();
    assert_eq!(updated.equity.as_deref(), Some("0.00"));
}

#[sqlx::test(fixtures("jobs"))]
async fn fixture_zero_equity_reads_back_with_scale(pool: PgPool) {
    let job = JobRepository::get(&pool, 1).await.unwrap();
    assert_eq!(job.equity.as_deref(), Some("0.0"));

    let json = serde_json::to_value(&job).unwrap();
    assert_eq!(json["equity"], serde_json::json!("0.0"));
    assert_eq!(json["company"]["companyHandle"], serde_json::json!("c1"));
    assert!(json["company"].get("handle").is_none());
}

// ---------------------------------------------------------------------------
// find_all
// ---------------------------------------------------------------------------

#[sqlx::test(fixtures("jobs"))]
async fn find_all_without_filter_lists_everything_by_title(pool: PgPool) {
    let none = JobRepository::find_all(&pool, None).await.unwrap();
    let empty = JobRepository::find_all(&pool, Some(&JobFilter::default()))
        .await
        .unwrap();

    assert_eq!(titles(&none), vec!["j1", "j2", "j3"]);
    assert_eq!(none, empty);
    assert_eq!(none[1].company_name, "C2");
    assert_eq!(none[1].equity.as_deref(), Some("0.2"));
}

#[sqlx::test(fixtures("jobs"))]
async fn find_all_title_is_case_insensitive_substring(pool: PgPool) {
    let filter = JobFilter {
        title: Some("J1".to_string()),
        ..JobFilter::default()
    };
    let jobs = JobRepository::find_all(&pool, Some(&filter)).await.unwrap();
    assert_eq!(titles(&jobs), vec!["j1"]);
}

#[sqlx::test(fixtures("jobs"))]
async fn find_all_min_salary(pool: PgPool) {
    let filter = JobFilter {
        min_salary: Some(2500),
        ..JobFilter::default()
    };
    let jobs = JobRepository::find_all(&pool, Some(&filter)).await.unwrap();
    assert_eq!(titles(&jobs), vec!["j3"]);

    let filter = JobFilter {
        min_salary: Some(2000),
        ..JobFilter::default()
    };
    let jobs = JobRepository::find_all(&pool, Some(&filter)).await.unwrap();
    assert_eq!(titles(&jobs), vec!["j2", "j3"]);
}

#[sqlx::test(fixtures("jobs"))]
async fn find_all_has_equity(pool: PgPool) {
    let with_equity = JobFilter {
        has_equity: Some(true),
        ..JobFilter::default()
    };
    let jobs = JobRepository::find_all(&pool, Some(&with_equity))
        .await
        .unwrap();
    assert_eq!(titles(&jobs), vec!["j2", "j3"]);

    let without = JobFilter {
        has_equity: Some(false),
        ..JobFilter::default()
    };
    let jobs = JobRepository::find_all(&pool, Some(&without)).await.unwrap();
    assert_eq!(titles(&jobs), vec!["j1", "j2", "j3"]);
}

#[sqlx::test(fixtures("jobs"))]
async fn adding_filters_only_narrows_results(pool: PgPool) {
    let title_only = JobFilter {
        title: Some("j".to_string()),
        ..JobFilter::default()
    };
    let all_three = JobFilter {
        title: Some("j".to_string()),
        min_salary: Some(1500),
        has_equity: Some(true),
    };

    let wide = JobRepository::find_all(&pool, Some(&title_only))
        .await
        .unwrap();
    let narrow = JobRepository::find_all(&pool, Some(&all_three))
        .await
        .unwrap();

    assert_eq!(titles(&narrow), vec!["j2", "j3"]);
    assert!(narrow.iter().all(|job| wide.contains(job)));
}

#[sqlx::test(fixtures("jobs"))]
async fn hostile_title_filter_matches_nothing(pool: PgPool) {
    let filter = JobFilter {
        title: Some("' OR '1'='1".to_string()),
        ..JobFilter::default()
    };
    let jobs = JobRepository::find_all(&pool, Some(&filter)).await.unwrap();
    assert!(jobs.is_empty());
}

#[sqlx::test(fixtures("jobs"))]
async fn title_wildcards_are_literal(pool: PgPool) {
    let filter = JobFilter {
        title: Some("%".to_string()),
        ..JobFilter::default()
    };
    let jobs = JobRepository::find_all(&pool, Some(&filter)).await.unwrap();
    assert!(jobs.is_empty());
}

// ---------------------------------------------------------------------------
// get
// ---------------------------------------------------------------------------

#[sqlx::test(fixtures("jobs"))]
async fn get_includes_full_company(pool: PgPool) {
    let job = JobRepository::get(&pool, 1).await.unwrap();

    assert_eq!(job.title, "j1");
    assert_eq!(job.salary, Some(1000));
    assert_eq!(job.company.handle, "c1");
    assert_eq!(job.equity.as_deref(), Some("0.0"));
    assert_eq!(job.company.name, "C1");
    assert_eq!(job.company.num_employees, Some(1));
    assert_eq!(job.company.description, "Desc1");
    assert_eq!(job.company.logo_url.as_deref(), Some("http://c1.img"));

    let json = serde_json::to_value(&job).unwrap();
    assert_eq!(json["company"]["companyHandle"], serde_json::json!("c1"));
}

#[sqlx::test(fixtures("jobs"))]
async fn get_missing_job_is_not_found(pool: PgPool) {
    let err = JobRepository::get(&pool, 999).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(999)));
}

// ---------------------------------------------------------------------------
// update
// ---------------------------------------------------------------------------

#[sqlx::test(fixtures("jobs"))]
async fn update_changes_only_given_fields(pool: PgPool) {
    let changes = UpdateJob {
        title: Some("New".to_string()),
        salary: Some(50_000),
        equity: None,
    };
    let job = JobRepository::update(&pool, 1, &changes).await.unwrap();

    assert_eq!(job.id, 1);
    assert_eq!(job.title, "New");
    assert_eq!(job.salary, Some(50_000));
    assert_eq!(job.equity.as_deref(), Some("0.0"));
    assert_eq!(job.company_handle, "c1");
}

#[sqlx::test(fixtures("jobs"))]
async fn update_stores_hostile_text_verbatim(pool: PgPool) {
    let hostile = "x', salary = 0 --".to_string();
    let changes = UpdateJob {
        title: Some(hostile.clone()),
        ..UpdateJob::default()
    };
    let job = JobRepository::update(&pool, 2, &changes).await.unwrap();

    assert_eq!(job.title, hostile);
    assert_eq!(job.salary, Some(2000));
}

#[sqlx::test(fixtures("jobs"))]
async fn update_missing_job_is_not_found_and_changes_nothing(pool: PgPool) {
    let before = JobRepository::find_all(&pool, None).await.unwrap();

    let changes = UpdateJob {
        title: Some("x".to_string()),
        ..UpdateJob::default()
    };
    let err = JobRepository::update(&pool, 999, &changes).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(999)));

    let after = JobRepository::find_all(&pool, None).await.unwrap();
    assert_eq!(before, after);
}

#[sqlx::test(fixtures("jobs"))]
async fn update_without_fields_is_empty_input(pool: PgPool) {
    let err = JobRepository::update(&pool, 1, &UpdateJob::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::EmptyInput));
}

// ---------------------------------------------------------------------------
// remove
// ---------------------------------------------------------------------------

#[sqlx::test(fixtures("jobs"))]
async fn remove_then_get_is_not_found(pool: PgPool) {
    JobRepository::remove(&pool, 1).await.unwrap();

    let err = JobRepository::get(&pool, 1).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(1)));

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 2);
}

#[sqlx::test(fixtures("jobs"))]
async fn remove_twice_is_not_found(pool: PgPool) {
    JobRepository::remove(&pool, 3).await.unwrap();
    let err = JobRepository::remove(&pool, 3).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(3)));
}
