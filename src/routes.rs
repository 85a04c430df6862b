use crate::{
    api::{attendance, employee, health, inventory, timesheet},
    config::Config,
    error::ApiError,
};
use actix_governor::{
    GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use tracing::warn;

/// Per-peer limiter allowing `requests_per_min` requests with an equal burst.
pub fn rate_limiter(
    requests_per_min: u32,
) -> Option<GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);

    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!(error = %err, "Rejected JSON payload");
        ApiError::Validation(format!("Invalid request body: {err}")).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        ApiError::Validation(format!("Invalid path parameter: {err}")).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .route("/health", web::get().to(health::health));

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    // /employees/stats, registered before /{id}
                    .service(web::resource("/stats").route(web::get().to(employee::employee_stats)))
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/inventory")
                    .service(
                        web::resource("")
                            .route(web::get().to(inventory::list_inventory))
                            .route(web::post().to(inventory::create_inventory_item)),
                    )
                    .service(
                        web::resource("/stats").route(web::get().to(inventory::inventory_stats)),
                    )
                    .service(
                        web::resource("/{id}/reorder")
                            .route(web::put().to(inventory::reorder_inventory_item)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(inventory::get_inventory_item))
                            .route(web::put().to(inventory::update_inventory_item))
                            .route(web::delete().to(inventory::delete_inventory_item)),
                    ),
            )
            .service(
                web::scope("/timesheets")
                    .service(
                        web::resource("")
                            .route(web::get().to(timesheet::list_timesheets))
                            .route(web::post().to(timesheet::create_timesheet)),
                    )
                    // attendance clock
                    .service(web::resource("/login").route(web::post().to(attendance::login)))
                    .service(web::resource("/logout").route(web::post().to(attendance::logout)))
                    .service(
                        web::resource("/logs/{employee_id}")
                            .route(web::get().to(attendance::employee_logs)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(timesheet::update_timesheet))
                            .route(web::delete().to(timesheet::delete_timesheet)),
                    ),
            ),
    );
}
