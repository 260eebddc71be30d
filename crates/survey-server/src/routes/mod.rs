//! HTTP routes.

pub mod comparison;
pub mod records;

use axum::Json;
use axum::Router;
use axum::routing::get;
use survey_core::responses::StatusMessage;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

/// Build the API router with permissive CORS and request tracing.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root))
        // Records
        .route(
            "/organizations",
            get(records::list_organizations).post(records::create_organization),
        )
        .route("/organizations/:id", get(records::get_organization))
        .route(
            "/clauses",
            get(records::list_clauses).post(records::create_clause),
        )
        .route(
            "/questions",
            get(records::list_questions).post(records::create_question),
        )
        .route(
            "/responses",
            get(records::list_responses).post(records::create_response),
        )
        .route(
            "/responses/:id",
            get(records::get_response)
                .put(records::update_response)
                .delete(records::delete_response),
        )
        // Comparison
        .route("/compare", get(comparison::compare))
        .route("/ai/compare", get(comparison::ai_compare))
        .route("/chart-data/yes-no", get(comparison::yes_no_chart))
        .route(
            "/chart-data/yes-no-comparison",
            get(comparison::yes_no_comparison),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "Survey API is running.".to_string(),
    })
}
