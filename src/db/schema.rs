//! SQL DDL for initializing the article storage.

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT, assigned by the store
/// - `title` / `content` TEXT; non-emptiness is checked by the handlers, not here
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS articles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT NOT NULL
);
"#;
