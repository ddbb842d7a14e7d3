use super::{auth_handlers, handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
///
/// The `/api/...` paths mirror the routes the browser UI calls.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/generate", post(handlers::generate_handler))
        .route("/api/generate-names", post(handlers::generate_handler))
        .route("/explain", post(handlers::explain_handler))
        .route("/api/explain-name", post(handlers::explain_handler))
        .route(
            "/auth/sign-in",
            get(auth_handlers::sign_in_handler).post(auth_handlers::sign_in_handler),
        )
        .route("/auth/callback", get(auth_handlers::callback_handler))
        .route("/auth/sign-out", post(auth_handlers::sign_out_handler))
        .route("/auth/user", get(auth_handlers::current_user_handler))
        .route("/auth/error", get(auth_handlers::auth_error_page))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
