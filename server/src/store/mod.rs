//! Post persistence.
//!
//! Handlers only see `SharedStore`; `main` picks the backend from configuration.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::models::post::{ListQuery, NewPost, Post};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Posts matching `query`, ordered as `query.sort` asks.
    async fn list(&self, query: &ListQuery) -> Result<Vec<Post>, StoreError>;

    async fn create(&self, new_post: NewPost) -> Result<Post, StoreError>;

    /// Adds one upvote atomically. `None` when no post has this id.
    async fn upvote(&self, id: i64) -> Result<Option<Post>, StoreError>;
}

pub type SharedStore = Arc<dyn PostStore>;
