use async_trait::async_trait;

use crate::domain::{NewPost, Post};
use crate::error::RepoError;

/// Post repository - the datastore gateway for the `posts` table.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts with `published_at` set, newest publication first, ties by newest creation.
    async fn list_published(&self) -> Result<Vec<Post>, RepoError>;

    /// Exact slug lookup, drafts included.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Insert a single row and return it as stored.
    ///
    /// A taken slug must be reported as [`RepoError::UniqueViolation`] so callers can retry.
    async fn insert(&self, post: &NewPost) -> Result<Post, RepoError>;
}
