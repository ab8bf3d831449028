//! Article Query Use Cases

use kernel::id::ArticleId;
use std::sync::Arc;

use crate::domain::entities::Article;
use crate::domain::repository::ArticleRepository;
use crate::error::{ArticleError, ArticleResult};

pub struct GetArticleUseCase<R>
where
    R: ArticleRepository,
{
    repo: Arc<R>,
}

impl<R> GetArticleUseCase<R>
where
    R: ArticleRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: ArticleId) -> ArticleResult<Article> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ArticleError::NotFound)
    }
}

/// Every article, ordered by id
pub struct ListArticlesUseCase<R>
where
    R: ArticleRepository,
{
    repo: Arc<R>,
}

impl<R> ListArticlesUseCase<R>
where
    R: ArticleRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> ArticleResult<Vec<Article>> {
        self.repo.list().await
    }
}

#[cfg(test)]
mod query_articles_tests {
    use super::*;
    use crate::domain::entities::NewArticle;
    use crate::domain::value_objects::{ArticleDescription, ArticleTitle};
    use crate::infra::memory::InMemoryArticleRepository;

    #[tokio::test]
    async fn test_get_and_list() {
        let repo = Arc::new(InMemoryArticleRepository::new());
        assert!(ListArticlesUseCase::new(repo.clone()).execute().await.unwrap().is_empty());

        let stored = repo
            .create(NewArticle {
                title: ArticleTitle::new("Hello").unwrap(),
                description: ArticleDescription::new("World").unwrap(),
            })
            .await
            .unwrap();

        let found = GetArticleUseCase::new(repo.clone()).execute(stored.id).await.unwrap();
        assert_eq!(found, stored);

        let all = ListArticlesUseCase::new(repo.clone()).execute().await.unwrap();
        assert_eq!(all, vec![stored]);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let repo = Arc::new(InMemoryArticleRepository::new());
        let result = GetArticleUseCase::new(repo)
            .execute(ArticleId::from_i64(42))
            .await;
        assert!(matches!(result, Err(ArticleError::NotFound)));
    }
}
