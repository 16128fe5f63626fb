pub mod job;
pub mod validation;

use actix_web::web::ServiceConfig;

/// Register every route the service exposes
pub fn configure(config: &mut ServiceConfig) {
    config.configure(job::handlers::job_config);
}
