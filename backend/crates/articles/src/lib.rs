//! Articles Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository trait
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Routes
//! - `/articles`, `/articles/{id}` - CRUD
//! - `/admin/articles` - listing with exact-match `title`/`description` filters
//!
//! Authentication is applied by the application that mounts these routers.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use domain::repository::ArticleRepository;
pub use error::{ArticleError, ArticleResult};
pub use infra::{InMemoryArticleRepository, PgArticleRepository};
pub use presentation::router::{admin_router, articles_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{app_error::AppError, kind::ErrorKind};
