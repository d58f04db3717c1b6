//! Post service - validation, slug assignment and persistence of journal posts.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    CreatePost, FALLBACK_SLUG, MAX_SLUG_ATTEMPTS, NewPost, Post, slug_candidate, slugify,
};
use crate::error::DomainError;
use crate::ports::PostRepository;

/// Post service over any [`PostRepository`].
///
/// Holds no state of its own between calls; every read goes to the repository.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Validate and persist a new post, retrying the slug on uniqueness conflicts.
    ///
    /// Candidates are `base`, `base-2` .. `base-5`. Once all of them collide the last
    /// conflict is returned as [`DomainError::Persistence`]; other datastore errors end the
    /// loop immediately.
    pub async fn create_post(&self, input: CreatePost) -> Result<Post, DomainError> {
        if input.title.is_empty() || input.content.is_empty() {
            return Err(DomainError::Validation(
                "Title and content are required".to_string(),
            ));
        }

        let base = base_slug(&input);

        let mut post = NewPost {
            title: input.title,
            slug: base.clone(),
            excerpt: input.excerpt.filter(|s| !s.is_empty()),
            content: input.content,
            cover_image_url: input.cover_image_url.filter(|s| !s.is_empty()),
            published_at: input.published.then(Utc::now),
        };

        let mut attempt = 1;
        loop {
            post.slug = slug_candidate(&base, attempt);

            match self.repo.insert(&post).await {
                Ok(created) => {
                    tracing::info!(
                        post_id = created.id,
                        slug = %created.slug,
                        attempt,
                        published = created.is_published(),
                        "Post created"
                    );
                    return Ok(created);
                }
                Err(err) if err.is_unique_violation() && attempt < MAX_SLUG_ATTEMPTS => {
                    tracing::debug!(slug = %post.slug, attempt, "Slug already taken");
                    attempt += 1;
                }
                Err(err) => {
                    if err.is_unique_violation() {
                        tracing::warn!(
                            base_slug = %base,
                            attempts = attempt,
                            "Slug candidates exhausted"
                        );
                    }
                    return Err(err.into());
                }
            }
        }
    }

    /// Published posts, newest first.
    pub async fn list_published_posts(&self) -> Result<Vec<Post>, DomainError> {
        let posts = self.repo.list_published().await?;
        tracing::debug!(count = posts.len(), "Listed published posts");
        Ok(posts)
    }

    /// Look up a post by slug. The slug is normalized first; a miss is `Ok(None)`.
    pub async fn get_post_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError> {
        let slug = slugify(slug);
        Ok(self.repo.find_by_slug(&slug).await?)
    }
}

/// First non-empty of the normalized override, the normalized title and [`FALLBACK_SLUG`].
fn base_slug(input: &CreatePost) -> String {
    [input.slug.as_deref(), Some(input.title.as_str())]
        .into_iter()
        .flatten()
        .map(slugify)
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_SLUG.to_string())
}
