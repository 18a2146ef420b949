use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::io;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use personalization_service::clients::CatalogClient;
use personalization_service::config::Config;
use personalization_service::handlers::{consent, events, genres, preferences, recommendations};
use personalization_service::repository::{PostgresPreferenceRepository, PreferenceRepository};
use personalization_service::services::{BehaviorTracker, ConsentService};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");

    tracing::info!(
        "Starting personalization-service v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("Environment: {}", config.app.env);

    // Initialize database
    let db_pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to create database pool");

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    // Wire repositories and services
    let repo: Arc<dyn PreferenceRepository> =
        Arc::new(PostgresPreferenceRepository::new(db_pool.clone()));
    let consent_service = ConsentService::new(repo.clone());

    let repo_data = web::Data::new(repo.clone());
    let consent_data = web::Data::new(consent_service.clone());
    let tracker_data = web::Data::new(BehaviorTracker::new(repo, consent_service));
    let catalog_data = web::Data::new(CatalogClient::new(config.clients.shelf_service_url.clone()));

    let bind_addr = format!("{}:{}", config.app.host, config.app.http_port);
    tracing::info!("Listening on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(repo_data.clone())
            .app_data(consent_data.clone())
            .app_data(tracker_data.clone())
            .app_data(catalog_data.clone())
            .route("/health", web::get().to(|| async { "OK" }))
            .service(
                web::scope("/api")
                    .service(consent::get_consent)
                    .service(consent::set_consent)
                    .service(events::track_view)
                    .service(events::track_search)
                    .service(genres::favorite_genres)
                    .service(genres::genre_highlight)
                    .service(preferences::get_preferences)
                    .service(preferences::put_preferences)
                    .service(preferences::track_reading_time)
                    .service(recommendations::get_recommendations),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
