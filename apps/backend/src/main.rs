use academy_backend::config::settings::Settings;
use academy_backend::middleware::{
    cors_middleware, AuthRateLimit, RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan,
};
use academy_backend::routes;
use academy_backend::state::builder::StateBuilder;
use actix_web::{web, App, HttpServer};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Settings come from the runtime environment (docker env_file, or
    // `set -a; . ./.env; set +a` locally).
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Startup validation failed: {e}");
            std::process::exit(1);
        }
    };

    telemetry::init_tracing(settings.debug);

    let app_state = match StateBuilder::from_settings(&settings) {
        Ok(builder) => builder.build(),
        Err(e) => {
            tracing::error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    if let Some(preview) = settings.database_url_preview() {
        tracing::info!(database_url = %preview, "database URL configured");
    }
    tracing::info!(
        testing = settings.testing,
        profile_store = app_state.profile_store.is_some(),
        "environment validation successful"
    );

    let host = settings.host.clone();
    let port = settings.port;
    let cors_origins = settings.cors_allowed_origins.clone();
    let data = web::Data::new(app_state);
    let auth_rate_limit = AuthRateLimit::new(settings.auth_rate_limit);

    tracing::info!(
        %host,
        port,
        auth_rate_limit = settings.auth_rate_limit.max_requests,
        auth_rate_window_secs = settings.auth_rate_limit.window.as_secs(),
        "starting academy backend"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&cors_origins))
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(|cfg| routes::configure_with_rate_limit(cfg, &auth_rate_limit))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
