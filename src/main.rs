use std::sync::Arc;

use actix_governor::Governor;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer};
use anyhow::Context;

use ops_dashboard::api::health;
use ops_dashboard::attendance::{AttendanceTracker, SystemClock};
use ops_dashboard::config::Config;
use ops_dashboard::db::build_store;
use ops_dashboard::docs;
use ops_dashboard::routes;

use tracing::info;
use tracing_appender::rolling;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(addr = %config.server_addr, "Server starting...");

    let store = build_store(&config).await;
    let tracker = Data::new(AttendanceTracker::new(store.clone(), Arc::new(SystemClock)));
    let store_data: Data<dyn ops_dashboard::store::Store> = Data::from(store);

    let governor_conf = routes::rate_limiter(config.rate_per_min)
        .context("RATE_PER_MIN does not yield a usable rate limit")?;

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .wrap(Governor::new(&governor_conf))
            .service(
                // wildcard so the UI's JS/CSS assets resolve
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url(
                        "/api-doc/openapi.json",
                        docs::api_doc(&config_data.api_prefix),
                    ),
            )
            .app_data(store_data.clone())
            .app_data(tracker.clone())
            .app_data(Data::new(config_data.clone()))
            .configure(|cfg| routes::configure(cfg, &config_data))
            .default_service(web::route().to(health::not_found))
    })
    .bind(&server_addr)
    .with_context(|| format!("failed to bind {server_addr}"))?
    .run()
    .await?;

    Ok(())
}
