use actix_web::{web, App, HttpServer};
use notes_backend::auth::TokenVerifier;
use notes_backend::config::AppConfig;
use notes_backend::middleware::cors_middleware;
use notes_backend::middleware::RequestContext;
use notes_backend::routes;
use notes_backend::state::AppState;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: via docker-compose env_file or docker run --env-file
    // - Local dev: source an env file manually (e.g. set -a; . ./.env; set +a)
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let verifier = match TokenVerifier::from_config(&config) {
        Ok(verifier) => verifier,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    println!(
        "🚀 Starting notes backend on http://{}:{} (issuer: {})",
        config.host, config.port, config.issuer
    );

    let state = AppState::new(verifier);
    let data = web::Data::new(state);

    let host = config.host.clone();
    let port = config.port;
    let cors_origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&cors_origins))
            .wrap(RequestContext)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
