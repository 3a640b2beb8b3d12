use actix_extensible_rate_limit::RateLimiter;
use actix_web::{web, Scope};

use crate::middleware::rate_limit::{self, AuthRateLimit};

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod health;

const AUTH_SCOPE: &str = "/api/v1/auth";

/// All routes, unthrottled.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .service(auth_scope())
        .configure(user_routes);
}

/// All routes, with `/api/v1/auth/*` behind the per-client rate limit.
pub fn configure_with_rate_limit(cfg: &mut web::ServiceConfig, limit: &AuthRateLimit) {
    let limiter = RateLimiter::builder(limit.backend(), limit.input().build())
        .add_headers()
        .request_denied_response(|output| rate_limit::denied_response(AUTH_SCOPE, output))
        .build();

    cfg.configure(health::configure_routes)
        .service(auth_scope().wrap(limiter))
        .configure(user_routes);
}

fn auth_scope() -> Scope {
    web::scope(AUTH_SCOPE).configure(auth::configure_routes)
}

fn user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1/dashboard").configure(dashboard::configure_routes))
        .service(web::scope("/api/admin").configure(admin::configure_routes));
}
