use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::PostStore;
use crate::errors::StoreError;
use crate::models::post::{ListQuery, NewPost, Post};

#[derive(Debug, Default)]
struct Inner {
    posts: Vec<Post>,
    last_id: i64,
}

/// Process-local store, used when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Post>, StoreError> {
        let inner = self.inner.read().await;
        let mut posts: Vec<Post> = inner
            .posts
            .iter()
            .filter(|post| query.matches(post))
            .cloned()
            .collect();
        query.sort(&mut posts);
        Ok(posts)
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let post = Post {
            id: inner.last_id,
            message: new_post.message,
            category: new_post.category,
            upvotes: 0,
            timestamp: Utc::now(),
        };
        inner.posts.push(post.clone());
        Ok(post)
    }

    async fn upvote(&self, id: i64) -> Result<Option<Post>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.posts.iter_mut().find(|p| p.id == id).map(|post| {
            post.upvotes += 1;
            post.clone()
        }))
    }
}
