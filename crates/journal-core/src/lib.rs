//! # Journal Core
//!
//! The domain layer of the travel journal.
//! This crate contains the post model, slug assignment and the post service,
//! with no infrastructure dependencies. Storage is reached through [`ports`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
pub use services::PostService;
