use crate::{
    api::{employee, leave_request},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

// Helper to build per-route limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);

    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("period and burst size are non-zero");
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    let submit_limiter = build_limiter(config.rate_submit_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/employees")
                    // /employees
                    .service(web::resource("").route(web::get().to(employee::list_employees)))
                    // /employees/{name}
                    .service(web::resource("/{name}").route(web::get().to(employee::get_dashboard)))
                    // /employees/{name}/balance
                    .service(
                        web::resource("/{name}/balance")
                            .route(web::get().to(employee::get_balance)),
                    )
                    // /employees/{name}/history
                    .service(
                        web::resource("/{name}/history")
                            .route(web::get().to(employee::get_history)),
                    ),
            )
            // /leave
            .service(
                web::resource("/leave")
                    .wrap(submit_limiter)
                    .route(web::post().to(leave_request::submit_leave)),
            ),
    );
}
