//! Application services - orchestration over the domain and ports.

mod post_service;

pub use post_service::PostService;
