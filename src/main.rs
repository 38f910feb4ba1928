use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod middleware;
mod pagination;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = crate::config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Stagecraft API in {:?} mode", config.environment);

    if config.database.run_migrations_on_boot {
        if let Err(e) = crate::db::Database::run_migrations().await {
            tracing::warn!("migrations not applied: {}", e);
        }
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("STAGECRAFT_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🎭 Stagecraft API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Dev-only token acquisition; 404s outside Development
        .route("/auth/token", axum::routing::post(handlers::auth::token))
        // Resource groups
        .merge(booking_routes())
        .merge(trivia_routes())
        .merge(agency_routes())
        // Global middleware
        .layer(TraceLayer::new_for_http());

    if crate::config::config().security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}

fn booking_routes() -> Router {
    use axum::routing::post;
    use handlers::booking::{artists, shows, venues};

    Router::new()
        // Venues
        .route("/venues", get(venues::list).post(venues::create))
        .route("/venues/search", post(venues::search))
        .route(
            "/venues/:id",
            get(venues::detail).put(venues::update).delete(venues::delete),
        )
        // Artists
        .route("/artists", get(artists::list).post(artists::create))
        .route("/artists/search", post(artists::search))
        .route(
            "/artists/:id",
            get(artists::detail).put(artists::update).delete(artists::delete),
        )
        // Shows
        .route("/shows", get(shows::list).post(shows::create))
}

fn trivia_routes() -> Router {
    use axum::routing::{delete, post};
    use handlers::trivia::{categories, questions, quizzes};

    Router::new()
        .route("/questions", get(questions::list).post(questions::create))
        .route("/questions/search", post(questions::search))
        .route("/questions/:id", delete(questions::delete))
        .route("/categories", get(categories::list))
        .route("/categories/:id/questions", get(categories::questions))
        .route("/quizzes", post(quizzes::play))
}

fn agency_routes() -> Router {
    use axum::routing::{get, patch};
    use handlers::agency::{actors, movies};

    Router::new()
        .route("/actors", get(actors::list).post(actors::create))
        .route("/actors/:id", patch(actors::update).delete(actors::delete))
        .route("/movies", get(movies::list).post(movies::create))
        .route("/movies/:id", patch(movies::update).delete(movies::delete))
        // Every agency route sits behind the bearer-token gate
        .layer(axum::middleware::from_fn(middleware::jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Stagecraft API",
            "version": version,
            "description": "Booking, trivia and casting-agency backend APIs built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "booking": "/venues, /artists, /shows (public)",
                "trivia": "/questions, /categories, /quizzes (public)",
                "agency": "/actors, /movies (protected - permission per route)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::db::Database::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
