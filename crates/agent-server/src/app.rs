//! Router assembly

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{health_check, invoke_tool, list_tools, require_platform_key};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/api/tools", get(list_tools))
        .route("/api/tools/{name}", post(invoke_tool))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_platform_key));

    Router::new()
        .route("/health", get(health_check))
        .merge(api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
