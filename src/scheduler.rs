//! Process-wide recurring job: once per calendar day at local midnight, the
//! attendance generator fills in Absent rows for the new day. Spawned exactly
//! once from `main`; the manual `/attendance/generate` endpoint covers
//! on-demand runs and testing.

use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::{error, info};

use crate::workflow::AttendanceGenerator;

fn until_next_midnight(now: DateTime<Local>) -> Duration {
    let tomorrow = now.date_naive() + chrono::Duration::days(1);
    // Midnight always exists for a valid date.
    let next = match tomorrow.and_hms_opt(0, 0, 0) {
        Some(t) => t,
        None => return Duration::from_secs(60),
    };
    next.signed_duration_since(now.naive_local())
        .to_std()
        .unwrap_or(Duration::from_secs(60))
}

pub fn spawn_daily_attendance(generator: AttendanceGenerator) {
    actix_web::rt::spawn(async move {
        loop {
            let wait = until_next_midnight(Local::now());
            actix_web::rt::time::sleep(wait).await;

            let today = Local::now().date_naive();
            match generator.generate_for_date(today).await {
                Ok(created) => info!(%today, created, "scheduled attendance generation ran"),
                Err(e) => error!(error = %e, %today, "scheduled attendance generation failed"),
            }
        }
    });
}
