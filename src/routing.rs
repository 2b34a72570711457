//! Application router configuration with the API routes and optional frontend files.

use std::path::Path;

use axum::{Router, routing::get};
use tower_http::services::{ServeDir, ServeFile};

use crate::{
    AppState, endpoints,
    not_found::get_404_not_found,
    report::{
        get_bar_chart_endpoint, get_combined_endpoint, get_pie_chart_endpoint,
        get_statistics_endpoint,
    },
    seed::init_database_endpoint,
    transaction::get_transactions_endpoint,
};

/// Return a router with all the API routes.
///
/// Requests to any other path get a 404.
pub fn build_router(state: AppState) -> Router {
    api_routes().fallback(get_404_not_found).with_state(state)
}

/// Return a router with all the API routes that also serves the prebuilt
/// frontend in `frontend_dir`.
///
/// Requests for paths that are neither an API route nor a file in
/// `frontend_dir` get `frontend_dir/index.html`, so that the frontend can do
/// its own routing.
pub fn build_router_with_frontend(state: AppState, frontend_dir: &Path) -> Router {
    let index = ServeFile::new(frontend_dir.join("index.html"));
    let frontend = ServeDir::new(frontend_dir).fallback(index);

    api_routes().fallback_service(frontend).with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(endpoints::INIT, get(init_database_endpoint))
        .route(endpoints::TRANSACTIONS_API, get(get_transactions_endpoint))
        .route(endpoints::STATISTICS, get(get_statistics_endpoint))
        .route(endpoints::BAR_CHART, get(get_bar_chart_endpoint))
        .route(endpoints::PIE_CHART, get(get_pie_chart_endpoint))
        .route(endpoints::COMBINED, get(get_combined_endpoint))
}
