//! HTTP API behind the Voy community board.
//!
//! Visitors post short messages under a category and upvote each other's posts.
//! The route table lives in [`routes`]; everything else serves it.

use axum::{http::HeaderValue, routing::get, Extension, Router};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod cors;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod store;

use crate::cors::cors::create_cors;
use crate::routes::routes;
use crate::store::SharedStore;

pub fn app(store: SharedStore, cors_origins: Vec<HeaderValue>) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(routes())
        .layer(Extension(store))
        .layer(create_cors(cors_origins))
        .layer(TraceLayer::new_for_http())
}

async fn root() -> &'static str {
    "Voy is listening."
}
