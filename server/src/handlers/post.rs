use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
    Extension, Json,
};
use tracing::{debug, info, warn};

use crate::errors::ApiError;
use crate::models::post::{CreatePost, ListParams, Post};
use crate::store::SharedStore;

pub async fn get_posts(
    Extension(store): Extension<SharedStore>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let Query(params) = params.map_err(|e| {
        warn!("Unreadable post listing query: {}", e);
        ApiError::BadRequest(e.body_text())
    })?;

    let query = params.parse().map_err(|e| {
        warn!("Rejected post listing: {}", e);
        ApiError::BadRequest(e)
    })?;

    let posts = store.list(&query).await?;
    debug!("Listing {} posts ({:?})", posts.len(), query);

    Ok(Json(posts))
}

pub async fn create_post(
    Extension(store): Extension<SharedStore>,
    payload: Result<Json<CreatePost>, JsonRejection>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let Json(payload) = payload.map_err(|e| {
        warn!("Unreadable post body: {}", e);
        ApiError::BadRequest(e.body_text())
    })?;

    let new_post = payload.validate().map_err(|e| {
        warn!("Rejected post: {}", e);
        ApiError::BadRequest(e)
    })?;

    let post = store.create(new_post).await?;
    info!("Created post {} in {}", post.id, post.category);

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn upvote_post(
    Extension(store): Extension<SharedStore>,
    Path(post_id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    // Non-numeric ids never match the route, so they get the same bare 404 as a missing page.
    let id = parse_post_id(&post_id).ok_or(ApiError::NoRoute)?;

    match store.upvote(id).await? {
        Some(post) => {
            info!("Post {} upvoted, now at {}", post.id, post.upvotes);
            Ok(Json(post))
        }
        None => Err(ApiError::NotFound(format!("Post {} not found", id))),
    }
}

fn parse_post_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::parse_post_id;

    #[test]
    fn post_id_must_be_digits() {
        assert_eq!(parse_post_id("7"), Some(7));
        assert_eq!(parse_post_id("007"), Some(7));
        assert_eq!(parse_post_id(""), None);
        assert_eq!(parse_post_id("-1"), None);
        assert_eq!(parse_post_id("+1"), None);
        assert_eq!(parse_post_id("abc"), None);
        assert_eq!(parse_post_id("99999999999999999999"), None);
    }
}
