use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use questline_core::health::healthz;
use questline_core::middleware::{acknowledge_preflight, cors_layer, request_id_layer};

use crate::handlers::{
    challenge::{create_challenge, get_challenge, list_challenges},
    health::readyz,
    onboarding::{get_progress, get_step, list_steps},
    submission::{create_submission, list_submissions, update_submission},
    user::{create_user, get_me},
    verify::{current_code, verify_code},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Verification
        .route("/verify", post(verify_code))
        .route("/verify/current", get(current_code))
        // Users
        .route("/users", post(create_user))
        .route("/users/@me", get(get_me))
        // Challenges
        .route("/challenges", get(list_challenges).post(create_challenge))
        .route("/challenges/{id}", get(get_challenge))
        // Onboarding
        .route("/onboarding/steps", get(list_steps))
        .route("/onboarding/steps/{id}", get(get_step))
        .route("/onboarding/progress", get(get_progress))
        // Submissions
        .route("/submissions", post(create_submission).get(list_submissions))
        .route("/submissions/{id}", patch(update_submission))
        .layer(middleware::from_fn(acknowledge_preflight))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
