use actix_web::{web, App, HttpServer};
use clap::Parser;
use std::io;
use tracing::info;

use job_board::api::{self, job::JobService, validation};
use job_board::cli::{Cli, Command};
use job_board::config::Config;
use job_board::db;
use job_board::logging;
use job_board::shutdown::ShutdownCoordinator;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Load configuration from environment
    let Config {
        database_url,
        max_payload_size,
        max_db_connections,
        log_dir,
        host,
        port,
    } = Config::from_env().map_err(io::Error::other)?;

    logging::init(&log_dir)?;

    let pool = db::connection::get_connection(&database_url, max_db_connections)
        .await
        .map_err(io::Error::other)?;
    info!("Database connection pool established (max {} connections)", max_db_connections);

    db::migrations::run_migrations(&pool)
        .await
        .map_err(io::Error::other)?;

    if *cli.command() == Command::Migrate {
        pool.close().await;
        return Ok(());
    }

    info!("Starting job-board application");
    info!("  - Max payload size: {} bytes", max_payload_size);

    // Clone pool for HTTP server (original will be used for shutdown)
    let server_pool = pool.clone();

    let server = HttpServer::new(move || {
        let job_service = web::Data::new(JobService::new(server_pool.clone()));

        App::new()
            .app_data(job_service)
            .app_data(web::PayloadConfig::default().limit(max_payload_size))
            .app_data(validation::json_config().limit(max_payload_size))
            .app_data(validation::query_config())
            .configure(api::configure)
    });

    info!("Server starting on http://{}:{}", host, port);

    let server = server.bind((host.as_str(), port))?.run();
    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task, pool)
        .wait_for_shutdown()
        .await
}
