pub mod form;
pub mod middleware;
pub mod page;
pub mod protocol;
pub mod rest;
pub mod state;

pub use middleware::ensure_session;
pub use rest::{form_schema_handler, prompt_preview_handler};

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use self::{form::*, rest::ApiDoc, state::AppState};

/// Builds the complete application router.
pub fn build_router(app_state: Arc<AppState>) -> Router {
    // Form pages (each browser gets its own writer session)
    let page_routes = Router::new()
        .route("/", get(index_handler))
        .route("/settings", post(settings_handler))
        .route("/generate", post(generate_handler))
        .route("/description", post(edit_description_handler))
        .route("/description/clear", post(clear_description_handler))
        .route("/description/download", get(download_handler))
        .route("/description/copy", get(copy_handler))
        .route("/error/dismiss", post(dismiss_error_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            ensure_session,
        ));

    // Stateless JSON routes
    let api_routes = Router::new()
        .route("/api/form-schema", get(form_schema_handler))
        .route("/api/prompt", post(prompt_preview_handler));

    Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
