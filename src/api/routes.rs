use axum::{extract::State, http::StatusCode, middleware, routing::get, Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use super::handlers::{auth_routes, todo_routes};
use super::middleware::auth_middleware;
use super::AppState;

/// Build the full application: public `/`, `/health`, `/auth/*` and
/// token-protected `/todo/*`.
pub fn create_router(state: AppState) -> Router {
    let todos = todo_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    Router::new()
        .route("/", get(|| async { "Todo API" }))
        .route("/health", get(health))
        .nest("/auth", auth_routes())
        .nest("/todo", todos)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    services: Dependencies,
}

#[derive(Serialize)]
struct Dependencies {
    database: Probe,
}

#[derive(Serialize)]
struct Probe {
    status: &'static str,
}

/// 200 when the database answers a ping, 503 otherwise.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<Health>) {
    let (code, status, database) = match state.database.ping().await {
        Ok(()) => (StatusCode::OK, "healthy", Probe { status: "healthy" }),
        Err(e) => {
            // Connection details stay in the log
            tracing::warn!(error = ?e, "Database ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "degraded",
                Probe {
                    status: "unhealthy",
                },
            )
        }
    };

    (
        code,
        Json(Health {
            status,
            services: Dependencies { database },
        }),
    )
}
