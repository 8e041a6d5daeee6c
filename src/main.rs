use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidshare::db::create_pool;
use vidshare::handlers::{
    self,
    health::HealthState,
};
use vidshare::storage::ObjectStorage;
use vidshare::Config;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()
        .map_err(anyhow::Error::msg)
        .context("failed to load configuration")?;

    tracing::info!("Starting vidshare v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Create database connection pool
    let db_pool = create_pool(&config.database)
        .await
        .context("failed to connect to database")?;

    tracing::info!(
        "Database pool created with {} max connections",
        config.database.max_connections
    );

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("failed to run database migrations")?;
    tracing::info!("Database migrations completed");

    // Connect object storage for media assets
    let storage = ObjectStorage::connect(&config.storage).await;
    tracing::info!(
        "Object storage ready (bucket: {})",
        config.storage.bucket
    );

    let health_state = web::Data::new(HealthState {
        env: config.app.env.clone(),
        started_at: Instant::now(),
    });

    let server_config = config.clone();
    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let pool_for_shutdown = db_pool.clone();

    let server = HttpServer::new(move || {
        // Build CORS configuration from allowed_origins
        let mut cors = Cors::default();
        for origin in server_config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(server_config.clone()))
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(storage.clone()))
            .app_data(health_state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/health", web::get().to(handlers::health::health_check))
            .service(
                web::scope("/api/v1")
                    .route("/health", web::get().to(handlers::health::health_check))
                    .service(
                        web::scope("/videos")
                            .route("", web::get().to(handlers::videos::list_videos))
                            .route("", web::post().to(handlers::videos::publish_video))
                            .route("/{id}", web::get().to(handlers::videos::get_video))
                            .route("/{id}", web::patch().to(handlers::videos::update_video))
                            .route("/{id}", web::delete().to(handlers::videos::delete_video))
                            .route(
                                "/{id}/publish",
                                web::patch().to(handlers::videos::toggle_publish),
                            )
                            .route(
                                "/{id}/comments",
                                web::get().to(handlers::comments::list_comments),
                            )
                            .route(
                                "/{id}/comments",
                                web::post().to(handlers::comments::create_comment),
                            ),
                    )
                    .service(
                        web::scope("/comments")
                            .route("/{id}", web::patch().to(handlers::comments::update_comment))
                            .route(
                                "/{id}",
                                web::delete().to(handlers::comments::delete_comment),
                            ),
                    )
                    .service(
                        web::scope("/tweets")
                            .route("", web::post().to(handlers::tweets::create_tweet))
                            .route("/{id}", web::patch().to(handlers::tweets::update_tweet))
                            .route("/{id}", web::delete().to(handlers::tweets::delete_tweet)),
                    )
                    .service(
                        web::scope("/likes")
                            .route(
                                "/video/{id}",
                                web::post().to(handlers::likes::toggle_video_like),
                            )
                            .route(
                                "/comment/{id}",
                                web::post().to(handlers::likes::toggle_comment_like),
                            )
                            .route(
                                "/tweet/{id}",
                                web::post().to(handlers::likes::toggle_tweet_like),
                            )
                            .route("/videos", web::get().to(handlers::likes::liked_videos)),
                    )
                    .route(
                        "/subscriptions/{channel_id}",
                        web::post().to(handlers::subscriptions::toggle_subscription),
                    )
                    .route(
                        "/channels/{id}/subscribers",
                        web::get().to(handlers::subscriptions::list_subscribers),
                    )
                    // /users/me before /users/{id} so the literal wins
                    .route(
                        "/users/me/history",
                        web::get().to(handlers::videos::watch_history),
                    )
                    .service(
                        web::scope("/users/{id}")
                            .route(
                                "/tweets",
                                web::get().to(handlers::tweets::list_user_tweets),
                            )
                            .route(
                                "/subscriptions",
                                web::get().to(handlers::subscriptions::list_subscribed_channels),
                            )
                            .route(
                                "/playlists",
                                web::get().to(handlers::playlists::list_user_playlists),
                            ),
                    )
                    .service(
                        web::scope("/playlists")
                            .route("", web::post().to(handlers::playlists::create_playlist))
                            .route("/{id}", web::get().to(handlers::playlists::get_playlist))
                            .route(
                                "/{id}",
                                web::patch().to(handlers::playlists::update_playlist),
                            )
                            .route(
                                "/{id}",
                                web::delete().to(handlers::playlists::delete_playlist),
                            )
                            .route(
                                "/{id}/videos/{video_id}",
                                web::post().to(handlers::playlists::add_video_to_playlist),
                            )
                            .route(
                                "/{id}/videos/{video_id}",
                                web::delete().to(handlers::playlists::remove_video_from_playlist),
                            ),
                    )
                    .service(
                        web::scope("/dashboard")
                            .route(
                                "/{channel_id}/stats",
                                web::get().to(handlers::dashboard::channel_stats),
                            )
                            .route(
                                "/{channel_id}/videos",
                                web::get().to(handlers::dashboard::channel_videos),
                            ),
                    ),
            )
    })
    .bind(&bind_address)?
    .run();

    let result = server.await;

    tracing::info!("Server shutting down");
    pool_for_shutdown.close().await;
    tracing::info!("Database pool closed. Shutdown complete.");

    result.context("http server terminated with an error")
}
