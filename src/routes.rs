use crate::{
    api::{calculate, cities, results, schema, upload},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let per_ms = 60_000 / requests_per_min as u64;
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms.max(1))
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let upload_limiter = Arc::new(build_limiter(config.rate_upload_per_min));
    let calculate_limiter = Arc::new(build_limiter(config.rate_calculate_per_min));

    cfg.service(
        web::scope(&config.api_prefix)
            // /calculate
            .service(
                web::resource("/calculate")
                    .wrap(calculate_limiter)
                    .route(web::post().to(calculate::calculate)),
            )
            // /results
            .service(web::resource("/results").route(web::get().to(results::list_results)))
            // /cities
            .service(web::resource("/cities").route(web::get().to(cities::list_cities)))
            // /extract-year
            .service(web::resource("/extract-year").route(web::get().to(cities::extract_year)))
            // /upload/{table}
            .service(
                web::resource("/upload/{table}")
                    .wrap(upload_limiter)
                    .route(web::post().to(upload::upload)),
            )
            // /init-db
            .service(
                web::resource("/init-db")
                    .route(web::get().to(schema::schema_status))
                    .route(web::post().to(schema::init_schema)),
            ),
    );
}
