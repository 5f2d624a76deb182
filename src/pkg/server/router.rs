use axum::routing::{delete, get, post};
use axum::Router;

use super::handlers;
use super::handlers::auth::{signin, signup};
use super::handlers::probes::{healthz, home, livez};
use super::state::AppState;

pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/api/signup", post(signup))
        .route("/api/signin", post(signin))
        .route("/api/resumes", post(handlers::resumes::create))
        .route(
            "/api/resumes/:resume_id",
            get(handlers::resumes::retrieve)
                .put(handlers::resumes::replace)
                .patch(handlers::resumes::update)
                .delete(handlers::resumes::remove),
        )
        .route("/api/users/:user_id", delete(handlers::users::remove))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state)
}
