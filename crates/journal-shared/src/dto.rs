//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/posts`.
///
/// Text fields are kept loose so that numbers and booleans can be coerced to text; see
/// [`CreatePostRequest::title_text`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub excerpt: Option<Value>,
    #[serde(default)]
    pub cover_image_url: Option<Value>,
    /// Short alias of `cover_image_url`.
    #[serde(default)]
    pub cover: Option<Value>,
    #[serde(default)]
    pub slug: Option<Value>,
    #[serde(default)]
    pub published: Option<Value>,
}

impl CreatePostRequest {
    pub fn title_text(&self) -> String {
        coerce_text(self.title.as_ref())
    }

    pub fn content_text(&self) -> String {
        coerce_text(self.content.as_ref())
    }

    pub fn excerpt_text(&self) -> Option<String> {
        non_empty(self.excerpt.as_ref())
    }

    /// Slug override, `None` when absent or empty.
    pub fn slug_text(&self) -> Option<String> {
        non_empty(self.slug.as_ref())
    }

    /// `cover_image_url` unless empty, then `cover`.
    pub fn cover(&self) -> Option<String> {
        non_empty(self.cover_image_url.as_ref()).or_else(|| non_empty(self.cover.as_ref()))
    }

    /// Only a literal `false` makes a draft; absent or anything else publishes.
    pub fn is_draft(&self) -> bool {
        matches!(self.published, Some(Value::Bool(false)))
    }
}

/// Strings pass through, non-zero numbers and `true` are rendered. `false`, zero, null
/// and structured values are empty.
fn coerce_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => String::new(),
    }
}

fn non_empty(value: Option<&Value>) -> Option<String> {
    Some(coerce_text(value)).filter(|s| !s.is_empty())
}

/// A post as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image_url: Option<String>,
    pub published_at: Option<String>,
    pub created_at: String,
}

/// `{ "post": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostEnvelope {
    pub post: PostResponse,
}

/// `{ "posts": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
}

/// ISO-8601 in UTC with millisecond precision and a `Z` suffix.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
