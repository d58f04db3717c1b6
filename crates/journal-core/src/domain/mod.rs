//! Domain entities - the core business objects.

mod post;
pub mod slug;

pub use post::{CreatePost, NewPost, Post};
pub use slug::{FALLBACK_SLUG, MAX_SLUG_ATTEMPTS, slug_candidate, slugify};
