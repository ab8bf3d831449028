//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use kernel::id::ArticleId;

use crate::domain::entities::{Article, ArticleFilter, ArticlePatch, NewArticle};
use crate::error::ArticleResult;

/// Article repository trait
#[trait_variant::make(ArticleRepository: Send)]
pub trait LocalArticleRepository {
    /// Store a new article; the store assigns the id
    async fn create(&self, article: NewArticle) -> ArticleResult<Article>;

    /// Find article by ID
    async fn find_by_id(&self, id: ArticleId) -> ArticleResult<Option<Article>>;

    /// All articles, ordered by id
    async fn list(&self) -> ArticleResult<Vec<Article>>;

    /// Articles matching every field of `filter`, ordered by id
    async fn filter(&self, filter: &ArticleFilter) -> ArticleResult<Vec<Article>>;

    /// Merge `patch` into the stored article; `None` if there is no such article
    async fn update(&self, id: ArticleId, patch: ArticlePatch) -> ArticleResult<Option<Article>>;

    /// Remove an article; `false` if there was no such article
    async fn delete(&self, id: ArticleId) -> ArticleResult<bool>;
}
