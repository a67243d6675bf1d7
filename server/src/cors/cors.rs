use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;

pub fn create_cors(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
    .allow_methods([
        Method::GET,
        Method::POST,
        Method::OPTIONS,
    ])
    .allow_headers([
        header::CONTENT_TYPE,
        header::ACCEPT,
        header::ORIGIN,
    ])
    .allow_origin(origins)
}
