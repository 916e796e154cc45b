use crate::db::gateway::{SqlParam, StorageGateway};
use crate::db::models::Article;
use crate::error::ArticleError;
use futures::TryStreamExt;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// Article operations. No validation happens here; callers check inputs.
#[derive(Clone)]
pub struct ArticleRepository {
    gateway: StorageGateway,
}

impl ArticleRepository {
    pub fn new(gateway: StorageGateway) -> Self {
        Self { gateway }
    }

    /// Insert a row and return the id the store assigned.
    pub async fn create(&self, title: &str, content: &str) -> Result<i64, ArticleError> {
        let row = self
            .gateway
            .query_one(
                "INSERT INTO articles (title, content) VALUES (?, ?) RETURNING id",
                &[title.into(), content.into()],
            )
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(row.try_get("id")?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Article>, ArticleError> {
        self.gateway
            .query_one(
                "SELECT id, title, content FROM articles WHERE id = ?",
                &[id.into()],
            )
            .await?
            .map(Self::row_to_model)
            .transpose()
    }

    /// Every stored article, in whatever order the store yields them.
    pub async fn list_all(&self) -> Result<Vec<Article>, ArticleError> {
        self.gateway
            .query("SELECT id, title, content FROM articles", &[])
            .and_then(|row| async move { Self::row_to_model(row) })
            .try_collect()
            .await
    }

    /// Replace title and content; returns affected rows (0 when `id` does not exist).
    pub async fn update_by_id(
        &self,
        id: i64,
        title: &str,
        content: &str,
    ) -> Result<u64, ArticleError> {
        let params: [SqlParam; 3] = [title.into(), content.into(), id.into()];
        self.gateway
            .execute(
                "UPDATE articles SET title = ?, content = ? WHERE id = ?",
                &params,
            )
            .await
    }

    fn row_to_model(row: SqliteRow) -> Result<Article, ArticleError> {
        Ok(Article::from_row(&row)?)
    }
}
