use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
}
