use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::io;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shelf_service::config::Config;
use shelf_service::handlers::{books, follows, reviews, shelf, users};
use shelf_service::repository::{
    PostgresBookRepository, PostgresFollowRepository, PostgresUserBookRepository, UserRepository,
};
use shelf_service::services::{FollowService, ShelfService};

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

    tracing::info!("Starting shelf-service v{}", env!("CARGO_PKG_VERSION"));
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
    let shelf_service = web::Data::new(ShelfService::new(
        Arc::new(PostgresBookRepository::new(db_pool.clone())),
        Arc::new(PostgresUserBookRepository::new(db_pool.clone())),
    ));
    let follow_service = web::Data::new(FollowService::new(Arc::new(
        PostgresFollowRepository::new(db_pool.clone()),
    )));
    let user_repository = web::Data::new(UserRepository::new(db_pool.clone()));

    let bind_addr = format!("{}:{}", config.app.host, config.app.http_port);
    tracing::info!("Listening on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(shelf_service.clone())
            .app_data(follow_service.clone())
            .app_data(user_repository.clone())
            .route("/health", web::get().to(|| async { "OK" }))
            .service(
                web::scope("/api")
                    .service(books::list_books)
                    .service(books::get_book)
                    .service(books::create_book)
                    .service(shelf::list_shelf)
                    .service(shelf::add_to_shelf)
                    .service(shelf::update_shelf_entry)
                    .service(shelf::remove_shelf_entry)
                    .service(follows::follow_user)
                    .service(follows::unfollow_user)
                    .service(follows::follow_status)
                    .service(follows::list_followers)
                    .service(follows::list_following)
                    .service(users::list_users)
                    .service(users::get_user_profile)
                    .service(users::get_user)
                    .service(users::update_user)
                    .service(reviews::list_reviews),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
