use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

use crate::api::{attendance, employee, leave};
use crate::config::Config;

fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        60_000 / requests_per_min as u64
    };
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .unwrap();
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    let limiter = build_limiter(config.rate_protected_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(limiter)
            .service(
                web::scope("/employees")
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    .service(
                        web::resource("/{mail}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/leave")
                    .service(
                        web::resource("")
                            .route(web::post().to(leave::create_leave))
                            .route(web::get().to(leave::leave_list)),
                    )
                    .service(web::resource("/my").route(web::get().to(leave::my_requests)))
                    .service(
                        web::resource("/balance")
                            .route(web::get().to(leave::get_balance))
                            .route(web::put().to(leave::update_balance)),
                    )
                    .service(
                        web::resource("/{id}/decide").route(web::put().to(leave::decide_leave)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    .service(
                        web::resource("/generate").route(web::post().to(attendance::generate)),
                    )
                    .service(
                        web::resource("/mark-present")
                            .route(web::put().to(attendance::mark_present)),
                    )
                    .service(web::resource("/update").route(web::put().to(attendance::update)))
                    .service(web::resource("/day").route(web::get().to(attendance::day)))
                    .service(web::resource("/range").route(web::get().to(attendance::range)))
                    .service(
                        web::resource("/employee-range")
                            .route(web::get().to(attendance::employee_range)),
                    ),
            ),
    );
}
