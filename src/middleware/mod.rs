//! Request extractors shared by the article handlers.

pub mod article_request;

pub use article_request::{ArticleFields, ArticleId};
