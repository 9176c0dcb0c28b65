use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use roomie_algo::config::Settings;
use roomie_algo::core::PreferenceEngine;
use roomie_algo::routes::{self, AppState, RankLimits};
use roomie_algo::services::ProfileStore;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    // RUST_LOG wins over the configured level when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match format {
        "pretty" => subscriber.pretty().init(),
        "json" => subscriber.json().init(),
        _ => subscriber.init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting Roomie Algo preference service...");

    let store = Arc::new(ProfileStore::new(
        settings.store.max_sessions,
        settings.store.idle_timeout_secs,
    ));

    info!(
        "Profile store initialized (max sessions: {}, idle timeout: {}s)",
        settings.store.max_sessions, settings.store.idle_timeout_secs
    );

    let engine = PreferenceEngine::new(settings.category_weights())
        .with_min_score(settings.matching.min_score);

    info!("Preference engine initialized with weights: {:?}", engine.weights());

    let app_state = AppState {
        store,
        engine,
        limits: RankLimits {
            default_limit: settings.matching.default_limit,
            max_limit: settings.matching.max_limit,
        },
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))
    .map_err(|e| {
        error!("Failed to bind HTTP server: {}", e);
        e
    })?
    .run()
    .await
}
