use axum::Router;

pub mod post;

pub fn routes() -> Router {
    Router::new()
    .nest("/api", post::post_route())
}
