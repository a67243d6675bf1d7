use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::post::{create_post, get_posts, upvote_post};

pub fn post_route() -> Router {
    Router::new()
    .route("/posts/", get(get_posts).post(create_post))
    .route("/upvote/{post_id}/", post(upvote_post))
}
