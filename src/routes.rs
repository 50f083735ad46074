// routes.rs
use axum::{
    body::Body,
    routing::{get, post},
    Router,
};
use http::{Method, Request};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_methods([Method::GET, Method::POST]);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
            id = %uuid::Uuid::new_v4(),
        )
    });

    Router::new()
        .route("/polls/", get(handlers::index))
        .route("/polls/{question_id}/", get(handlers::detail))
        .route("/polls/{question_id}/results/", get(handlers::results))
        .route("/polls/{question_id}/vote/", post(handlers::vote))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(trace)
        .with_state(state)
}
