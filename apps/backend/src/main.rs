use actix_web::{web, App, HttpServer};
use backend::config::counterpart::CounterpartConfig;
use backend::counterpart::create_counterpart;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::routes;
use backend::state::app_state::AppState;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    // Fail fast on a missing or placeholder counterpart configuration.
    let counterpart_config = match CounterpartConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    let counterpart = match create_counterpart(&counterpart_config) {
        Ok(counterpart) => counterpart,
        Err(e) => {
            eprintln!("❌ Failed to build counterpart: {e}");
            std::process::exit(1);
        }
    };

    println!("🚀 Starting Ultimatum Backend on http://{}:{}", host, port);
    println!("✅ Counterpart configured: {:?}", counterpart_config.kind);

    let app_state = AppState::new(counterpart);

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
