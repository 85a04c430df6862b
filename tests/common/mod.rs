use std::sync::Arc;

use actix_web::web::Data;
use chrono::{DateTime, TimeZone, Utc};

use ops_dashboard::attendance::{AttendanceTracker, ManualClock};
use ops_dashboard::store::{MemoryStore, Store};

pub struct TestState {
    pub store: Data<dyn Store>,
    pub tracker: Data<AttendanceTracker>,
    pub clock: Arc<ManualClock>,
}

pub fn start_of_shift() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
}

/// Seeded memory store with a clock frozen at 09:00 UTC.
pub fn state() -> TestState {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::seeded());
    let clock = Arc::new(ManualClock::new(start_of_shift()));
    let tracker = AttendanceTracker::new(store.clone(), clock.clone());

    TestState {
        store: Data::from(store),
        tracker: Data::new(tracker),
        clock,
    }
}

/// Builds the full app around `$state`, the same way `main` does minus the
/// rate limiter and request logging.
macro_rules! test_app {
    ($state:expr) => {{
        let config = ops_dashboard::config::Config::default();
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state.store.clone())
                .app_data($state.tracker.clone())
                .configure(|cfg| ops_dashboard::routes::configure(cfg, &config))
                .default_service(
                    actix_web::web::route().to(ops_dashboard::api::health::not_found),
                ),
        )
        .await
    }};
}
