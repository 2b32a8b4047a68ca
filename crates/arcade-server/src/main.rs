use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{HeaderName, Method, header},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use arcade_api::auth::{self, AppState, AppStateInner};
use arcade_api::{admin, friends, games, profile};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arcade=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
    let host = std::env::var("ARCADE_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("ARCADE_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Init database (pool + migrations)
    let db = arcade_db::Database::connect(&database_url).await?;

    // Shared state
    let state: AppState = Arc::new(AppStateInner { db });

    // The storefront client is served from another origin; preflights are
    // answered by the CORS layer with no body.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-user-id")])
        .max_age(Duration::from_secs(86400));

    // Routes
    let app = Router::new()
        .route("/auth", post(auth::auth))
        .route(
            "/games",
            get(games::list_games)
                .post(games::submit_game)
                .put(games::moderate_game)
                .delete(games::delete_game),
        )
        .route(
            "/profile",
            get(profile::get_profile)
                .put(profile::update_profile)
                .post(profile::profile_action),
        )
        .route(
            "/friends",
            get(friends::friends_query).post(friends::friends_action),
        )
        .route("/admin", get(admin::admin_query).put(admin::admin_action))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Arcade server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
