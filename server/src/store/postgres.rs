use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool, Postgres, QueryBuilder};
use tracing::info;

use super::PostStore;
use crate::errors::StoreError;
use crate::models::post::{ListQuery, NewPost, Post, SortOrder};

const CREATE_POSTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS posts (
    id BIGSERIAL PRIMARY KEY,
    message TEXT NOT NULL,
    category TEXT NOT NULL,
    upvotes BIGINT NOT NULL DEFAULT 0,
    timestamp TIMESTAMPTZ NOT NULL DEFAULT now()
)";

#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    message: String,
    category: String,
    upvotes: i64,
    timestamp: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = StoreError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let category = row
            .category
            .parse()
            .map_err(|reason| StoreError::Corrupt { id: row.id, reason })?;
        Ok(Post {
            id: row.id,
            message: row.message,
            category,
            upvotes: row.upvotes,
            timestamp: row.timestamp,
        })
    }
}

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_POSTS_TABLE).execute(&self.pool).await?;
        info!("posts table ready");
        Ok(())
    }
}

#[async_trait]
impl PostStore for PgStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Post>, StoreError> {
        let mut sql: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT id, message, category, upvotes, timestamp FROM posts");
        if let Some(category) = query.category {
            sql.push(" WHERE category = ").push_bind(category.as_str());
        }
        sql.push(match query.sort {
            SortOrder::Recent => " ORDER BY timestamp DESC, id DESC",
            SortOrder::Upvotes => " ORDER BY upvotes DESC, timestamp DESC, id DESC",
        });

        let rows: Vec<PostRow> = sql.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(Post::try_from).collect()
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, StoreError> {
        let row: PostRow = sqlx::query_as(
            "INSERT INTO posts (message, category) VALUES ($1, $2) \
             RETURNING id, message, category, upvotes, timestamp",
        )
        .bind(&new_post.message)
        .bind(new_post.category.as_str())
        .fetch_one(&self.pool)
        .await?;

        Post::try_from(row)
    }

    async fn upvote(&self, id: i64) -> Result<Option<Post>, StoreError> {
        let row: Option<PostRow> = sqlx::query_as(
            "UPDATE posts SET upvotes = upvotes + 1 WHERE id = $1 \
             RETURNING id, message, category, upvotes, timestamp",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Post::try_from).transpose()
    }
}
