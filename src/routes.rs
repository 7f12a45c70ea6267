//! Route definitions and endpoint mappings for the Study Gateway API.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::endpoints;
use crate::gateway_util::AppStateData;

/// Builds the full application router, including the permissive CORS layer
/// (any origin) and request tracing.
pub fn build_router(app_state: AppStateData) -> Router {
    Router::new()
        .route("/", get(endpoints::status::index_handler))
        .route(
            "/parse-syllabus",
            post(endpoints::syllabus::parse_syllabus_handler),
        )
        .route(
            "/generate-quiz",
            post(endpoints::quiz::generate_quiz_handler),
        )
        .route(
            "/generate-report-summary",
            post(endpoints::quiz::generate_report_summary_handler),
        )
        .route(
            "/get-video-suggestions",
            post(endpoints::videos::get_video_suggestions_handler),
        )
        .route(
            "/process-notes",
            post(endpoints::notes::process_notes_handler),
        )
        .route(
            "/generate-study-plan",
            post(endpoints::study_plan::generate_study_plan_handler),
        )
        .route(
            "/get-material-suggestions",
            post(endpoints::materials::get_material_suggestions_handler),
        )
        .route("/chat", post(endpoints::chat::chat_handler))
        .fallback(endpoints::fallback::handle_404)
        // Uploaded PDFs regularly exceed axum's 2MB default body limit
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
