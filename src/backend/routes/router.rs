/**
 * Router Configuration
 *
 * Assembles the chat routes, the 404 fallback and request tracing into the
 * application router.
 */

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::backend::error::not_found_fallback;
use crate::backend::routes::chat_routes::configure_chat_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_chat_routes(Router::new(), &app_state);

    router
        .fallback(not_found_fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
