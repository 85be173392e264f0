use axum::{routing::post, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::{info_handler, recommend};
use crate::config::Config;
use crate::recommend::Recommender;

pub const RECOMMEND_PATH: &str = "/api/recommend";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub recommender: Arc<dyn Recommender>,
}

impl AppState {
    pub fn new(config: Config, recommender: Arc<dyn Recommender>) -> Self {
        Self {
            config: Arc::new(config),
            recommender,
        }
    }
}

/// Only `POST /api/recommend` does any work. Other methods on that path and
/// every other path get the informational text.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route(RECOMMEND_PATH, post(recommend).fallback(info_handler))
        .fallback(info_handler)
        .layer(axum::middleware::from_fn(crate::middleware::log_request));

    if state.config.listen.cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
