use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::db::ArticleRepository;
use crate::handlers::{
    create_article, get_article, list_articles, not_found, update_article, welcome,
};

/// Shared handler context. The repository wraps the one storage gateway built at startup.
#[derive(Clone)]
pub struct ArticleState {
    pub repo: ArticleRepository,
}

impl ArticleState {
    pub fn new(repo: ArticleRepository) -> Self {
        Self { repo }
    }
}

pub fn article_router(state: ArticleState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/articles", get(list_articles).post(create_article))
        .route("/article/{id}", get(get_article).put(update_article))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
