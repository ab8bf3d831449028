//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, routers, middleware
//!
//! ## Features
//! - User accounts with CRUD over HTTP
//! - Opaque bearer tokens (`Authorization: Bearer <key>`, `Token` accepted)
//! - Token expiry and revocation
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (optional pepper)
//! - Only the SHA-256 of a token key is stored
//! - Inactive accounts cannot obtain or use tokens

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::{AuthenticatedUser, BootstrapUserUseCase};
pub use domain::repository::{TokenRepository, UserRepository};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAuthRepository, PgAuthRepository};
pub use presentation::middleware::{AuthMiddlewareState, require_bearer_token};
pub use presentation::router::{token_router, users_router};
