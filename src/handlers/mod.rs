pub mod articles;

pub use articles::{create_article, get_article, list_articles, not_found, update_article, welcome};
