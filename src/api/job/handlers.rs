use actix_web::{
    delete, get, patch, post,
    web::{Data, Path, ServiceConfig, scope},
    HttpResponse,
};
use actix_web_validator::{Json, Query};

use super::dto::{DeletedResponse, JobResponse, JobsResponse};
use super::models::{JobFilter, NewJob, UpdateJob};
use super::service::{JobService, ServiceError};

#[post("")]
async fn create_job(
    service: Data<JobService>,
    job: Json<NewJob>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.create_job(&job).await?;
    Ok(HttpResponse::Created().json(JobResponse { job }))
}

#[get("")]
async fn list_jobs(
    service: Data<JobService>,
    filter: Query<JobFilter>,
) -> Result<HttpResponse, ServiceError> {
    let jobs = service.list_jobs(&filter).await?;
    Ok(HttpResponse::Ok().json(JobsResponse { jobs }))
}

#[get("/{id}")]
async fn get_job(
    service: Data<JobService>,
    id: Path<i32>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.get_job(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JobResponse { job }))
}

#[patch("/{id}")]
async fn update_job(
    service: Data<JobService>,
    id: Path<i32>,
    changes: Json<UpdateJob>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.update_job(id.into_inner(), &changes).await?;
    Ok(HttpResponse::Ok().json(JobResponse { job }))
}

#[delete("/{id}")]
async fn delete_job(
    service: Data<JobService>,
    id: Path<i32>,
) -> Result<HttpResponse, ServiceError> {
    let id = id.into_inner();
    service.delete_job(id).await?;
    Ok(HttpResponse::Ok().json(DeletedResponse {
        deleted: id.to_string(),
    }))
}

pub fn job_config(config: &mut ServiceConfig) {
    config.service(
        scope("jobs")
            .service(create_job)
            .service(list_jobs)
            .service(get_job)
            .service(update_job)
            .service(delete_job),
    );
}
