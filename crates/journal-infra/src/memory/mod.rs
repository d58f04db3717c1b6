//! In-memory post repository - used when no database is configured.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use journal_core::domain::{NewPost, Post};
use journal_core::error::RepoError;
use journal_core::ports::PostRepository;

/// Post store backed by a `Vec` behind an async `RwLock`.
///
/// Enforces slug uniqueness the same way the `posts` table does.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
    next_id: AtomicI64,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_published(&self) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;

        let mut published: Vec<Post> = posts.iter().filter(|p| p.is_published()).cloned().collect();
        published.sort_by(|a, b| {
            b.published_at
                .cmp(&a.published_at)
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(published)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.slug == slug).cloned())
    }

    async fn insert(&self, post: &NewPost) -> Result<Post, RepoError> {
        // Check and push under one write lock, like a unique index would.
        let mut posts = self.posts.write().await;

        if posts.iter().any(|p| p.slug == post.slug) {
            return Err(RepoError::UniqueViolation(format!(
                "Key (slug)=({}) already exists",
                post.slug
            )));
        }

        let created = Post {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            cover_image_url: post.cover_image_url.clone(),
            published_at: post.published_at,
            created_at: Utc::now(),
        };
        posts.push(created.clone());

        Ok(created)
    }
}
