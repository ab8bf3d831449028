//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod bootstrap;
pub mod config;
pub mod create_user;
pub mod delete_user;
pub mod issue_token;
pub mod query_users;
pub mod revoke_token;
pub mod update_user;

// Re-exports
pub use authenticate::{AuthenticateUseCase, AuthenticatedUser};
pub use bootstrap::BootstrapUserUseCase;
pub use config::AuthConfig;
pub use create_user::{CreateUserUseCase, UserInput};
pub use delete_user::DeleteUserUseCase;
pub use issue_token::{IssueTokenInput, IssueTokenOutput, IssueTokenUseCase};
pub use query_users::{GetUserUseCase, ListUsersUseCase};
pub use revoke_token::RevokeTokenUseCase;
pub use update_user::UpdateUserUseCase;
