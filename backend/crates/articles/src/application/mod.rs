//! Application Layer
//!
//! Article use cases.

pub mod admin_listing;
pub mod create_article;
pub mod delete_article;
pub mod query_articles;
pub mod update_article;

// Re-exports
pub use admin_listing::{AdminListing, AdminListingUseCase};
pub use create_article::{ArticleInput, CreateArticleUseCase};
pub use delete_article::DeleteArticleUseCase;
pub use query_articles::{GetArticleUseCase, ListArticlesUseCase};
pub use update_article::UpdateArticleUseCase;
