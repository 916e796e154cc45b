use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{error, info};

use crate::db::Article;
use crate::middleware::{ArticleFields, ArticleId};
use crate::{ArticleError, router::ArticleState};

/// GET /
pub async fn welcome() -> &'static str {
    "Welcome to the intro server!\n"
}

/// GET /articles
pub async fn list_articles(State(state): State<ArticleState>) -> Result<String, ArticleError> {
    let articles = state
        .repo
        .list_all()
        .await
        .inspect_err(|e| error!(error = %e, "failed to list articles"))?;
    Ok(render_list(&articles))
}

/// POST /articles?title=..&content=..
pub async fn create_article(
    State(state): State<ArticleState>,
    fields: ArticleFields,
) -> Result<String, ArticleError> {
    let id = state
        .repo
        .create(&fields.title, &fields.content)
        .await
        .inspect_err(|e| error!(error = %e, "failed to create article"))?;
    info!(id, "article created");
    Ok(format!("✅ Article added successfully (id: {id})\n"))
}

/// GET /article/{id}
pub async fn get_article(
    State(state): State<ArticleState>,
    ArticleId(id): ArticleId,
) -> Result<String, ArticleError> {
    match state.repo.get_by_id(id).await {
        Ok(Some(article)) => Ok(render_article(&article)),
        Ok(None) => Err(ArticleError::NotFound(id)),
        Err(e) => {
            error!(id, error = %e, "failed to fetch article");
            Err(e)
        }
    }
}

/// PUT /article/{id}?title=..&content=..
pub async fn update_article(
    State(state): State<ArticleState>,
    ArticleId(id): ArticleId,
    fields: ArticleFields,
) -> Result<String, ArticleError> {
    let affected = state
        .repo
        .update_by_id(id, &fields.title, &fields.content)
        .await
        .inspect_err(|e| error!(id, error = %e, "failed to update article"))?;
    if affected == 0 {
        return Err(ArticleError::NotFound(id));
    }
    info!(id, "article updated");
    Ok(format!("✅ Article with ID {id} updated\n"))
}

/// Fallback for unrouted paths.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 page not found\n")
}

fn render_article(article: &Article) -> String {
    format!(
        "📝 Article: {}\n📄 Content: {}\n",
        article.title, article.content
    )
}

fn render_list(articles: &[Article]) -> String {
    if articles.is_empty() {
        return "📚 All Articles:\nNo articles found.\n".to_string();
    }
    std::iter::once("📚 All Articles:\n".to_string())
        .chain(
            articles
                .iter()
                .map(|a| format!("- {}: {} — {}\n", a.id, a.title, a.content)),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: i64, title: &str, content: &str) -> Article {
        Article {
            id,
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn renders_single_article() {
        assert_eq!(
            render_article(&article(1, "Hello", "World")),
            "📝 Article: Hello\n📄 Content: World\n"
        );
    }

    #[test]
    fn empty_listing_says_so() {
        assert_eq!(render_list(&[]), "📚 All Articles:\nNo articles found.\n");
    }

    #[test]
    fn listing_has_one_line_per_article() {
        let out = render_list(&[article(1, "a", "x"), article(2, "b", "y")]);
        assert_eq!(out, "📚 All Articles:\n- 1: a — x\n- 2: b — y\n");
    }
}
