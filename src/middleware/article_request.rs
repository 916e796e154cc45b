use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::ArticleError;

pub const FIELDS_REQUIRED: &str = "Title and content are required";

/// `title` and `content` taken from the query string, both present and non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFields {
    pub title: String,
    pub content: String,
}

impl ArticleFields {
    pub fn validate(
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Self, ArticleError> {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        match (non_blank(title), non_blank(content)) {
            (Some(title), Some(content)) => Ok(Self { title, content }),
            _ => Err(ArticleError::Validation(FIELDS_REQUIRED.to_string())),
        }
    }

    /// Pull `title` and `content` out of a raw query string. When a key repeats, the
    /// first occurrence wins; unknown keys are ignored.
    pub fn from_query(query: Option<&str>) -> Result<Self, ArticleError> {
        let mut title = None;
        let mut content = None;
        if let Some(qs) = query {
            for (k, v) in url::form_urlencoded::parse(qs.as_bytes()) {
                match k.as_ref() {
                    "title" if title.is_none() => title = Some(v.into_owned()),
                    "content" if content.is_none() => content = Some(v.into_owned()),
                    _ => {}
                }
            }
        }
        Self::validate(title, content)
    }
}

impl<S> FromRequestParts<S> for ArticleFields
where
    S: Send + Sync,
{
    type Rejection = ArticleError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_query(parts.uri.query())
    }
}

/// Integer article id from the `{id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleId(pub i64);

impl<S> FromRequestParts<S> for ArticleId
where
    S: Send + Sync,
{
    type Rejection = ArticleError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ArticleError::InvalidId(rejection.body_text()))?;
        raw.trim()
            .parse::<i64>()
            .map(ArticleId)
            .map_err(|_| ArticleError::InvalidId(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn accepts_non_blank_fields_as_given() {
        let fields = ArticleFields::validate(some(" Hello"), some("World ")).unwrap();
        assert_eq!(fields.title, " Hello");
        assert_eq!(fields.content, "World ");
    }

    #[test]
    fn rejects_missing_empty_or_blank_fields() {
        for (title, content) in [
            (None, some("c")),
            (some("t"), None),
            (some(""), some("c")),
            (some("t"), some("")),
            (some("   "), some("c")),
            (None, None),
        ] {
            let err = ArticleFields::validate(title, content).unwrap_err();
            assert!(matches!(err, ArticleError::Validation(ref m) if m == FIELDS_REQUIRED));
        }
    }

    #[test]
    fn repeated_keys_keep_the_first_value() {
        let fields = ArticleFields::from_query(Some("title=a&title=b&content=c&content=d&x=1"))
            .unwrap();
        assert_eq!(fields.title, "a");
        assert_eq!(fields.content, "c");
    }

    #[test]
    fn query_values_are_percent_decoded() {
        let fields = ArticleFields::from_query(Some("title=Hello%20there&content=a%26b+c")).unwrap();
        assert_eq!(fields.title, "Hello there");
        assert_eq!(fields.content, "a&b c");
    }

    #[test]
    fn absent_query_is_a_validation_error() {
        let err = ArticleFields::from_query(None).unwrap_err();
        assert!(matches!(err, ArticleError::Validation(_)));
    }
}
