//! Delete Article Use Case

use kernel::id::ArticleId;
use std::sync::Arc;

use crate::domain::repository::ArticleRepository;
use crate::error::{ArticleError, ArticleResult};

pub struct DeleteArticleUseCase<R>
where
    R: ArticleRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteArticleUseCase<R>
where
    R: ArticleRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: ArticleId) -> ArticleResult<()> {
        if !self.repo.delete(id).await? {
            return Err(ArticleError::NotFound);
        }

        tracing::info!(article_id = %id, "Article deleted");

        Ok(())
    }
}
