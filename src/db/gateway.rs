use crate::db::schema::SQLITE_INIT;
use crate::error::ArticleError;
use futures::{StreamExt, TryStreamExt, stream::BoxStream};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Connection, Pool, Sqlite};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

/// A positional statement parameter, bound in order to `?` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        SqlParam::Int(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}

/// Process-wide handle to the relational store. Cloning shares the pool.
#[derive(Clone)]
pub struct StorageGateway {
    pool: SqlitePool,
}

impl StorageGateway {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Open the pool, check connectivity once and apply the bundled schema.
    ///
    /// In-memory databases live only as long as their connection, so they get a single
    /// connection that is never recycled.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, ArticleError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool_options = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let gateway = Self::new(pool_options.connect_with(options).await?);
        gateway.ping().await?;
        gateway.init_schema().await?;
        Ok(gateway)
    }

    pub async fn ping(&self) -> Result<(), ArticleError> {
        let mut conn = self.pool.acquire().await?;
        conn.ping().await?;
        Ok(())
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), ArticleError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Run a write statement and return the number of affected rows.
    pub async fn execute(&self, sql: &str, params: &[SqlParam]) -> Result<u64, ArticleError> {
        let result = bind_params(sql, params).execute(&self.pool).await?;
        debug!(rows_affected = result.rows_affected(), "statement executed");
        Ok(result.rows_affected())
    }

    /// Stream every row the statement yields.
    pub fn query<'q>(
        &'q self,
        sql: &'q str,
        params: &'q [SqlParam],
    ) -> BoxStream<'q, Result<SqliteRow, ArticleError>> {
        bind_params(sql, params)
            .fetch(&self.pool)
            .map_err(ArticleError::from)
            .boxed()
    }

    /// Fetch at most one row; `None` when the statement yields nothing.
    pub async fn query_one(
        &self,
        sql: &str,
        params: &[SqlParam],
    ) -> Result<Option<SqliteRow>, ArticleError> {
        Ok(bind_params(sql, params)
            .fetch_optional(&self.pool)
            .await?)
    }
}

fn bind_params<'q>(
    sql: &'q str,
    params: &'q [SqlParam],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    params
        .iter()
        .fold(sqlx::query(sql), |query, param| match param {
            SqlParam::Int(v) => query.bind(*v),
            SqlParam::Text(s) => query.bind(s.as_str()),
        })
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
