//! Update Article Use Case
//!
//! Serves both PUT and PATCH. The write mode only changes which fields the
//! body must carry; by the time input reaches here, absent means unchanged.

use kernel::id::ArticleId;
use std::sync::Arc;

use crate::application::create_article::ArticleInput;
use crate::domain::entities::Article;
use crate::domain::repository::ArticleRepository;
use crate::error::{ArticleError, ArticleResult};

pub struct UpdateArticleUseCase<R>
where
    R: ArticleRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateArticleUseCase<R>
where
    R: ArticleRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: ArticleId, input: ArticleInput) -> ArticleResult<Article> {
        let article = self
            .repo
            .update(id, input.into_patch())
            .await?
            .ok_or(ArticleError::NotFound)?;

        tracing::info!(article_id = %article.id, "Article updated");

        Ok(article)
    }
}

#[cfg(test)]
mod update_article_tests {
    use super::*;
    use crate::domain::entities::NewArticle;
    use crate::domain::value_objects::{ArticleDescription, ArticleTitle};
    use crate::infra::memory::InMemoryArticleRepository;

    async fn seeded() -> (Arc<InMemoryArticleRepository>, Article) {
        let repo = Arc::new(InMemoryArticleRepository::new());
        let article = repo
            .create(NewArticle {
                title: ArticleTitle::new("Hello").unwrap(),
                description: ArticleDescription::new("World").unwrap(),
            })
            .await
            .unwrap();
        (repo, article)
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let (repo, article) = seeded().await;

        let updated = UpdateArticleUseCase::new(repo.clone())
            .execute(
                article.id,
                ArticleInput {
                    title: Some(ArticleTitle::new("X").unwrap()),
                    description: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, article.id);
        assert_eq!(updated.title.as_str(), "X");
        assert_eq!(updated.description.as_str(), "World");

        let stored = repo.find_by_id(article.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_empty_input_is_a_no_op() {
        let (repo, article) = seeded().await;
        let updated = UpdateArticleUseCase::new(repo)
            .execute(article.id, ArticleInput::default())
            .await
            .unwrap();
        assert_eq!(updated, article);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let (repo, _) = seeded().await;
        let result = UpdateArticleUseCase::new(repo)
            .execute(ArticleId::from_i64(99), ArticleInput::default())
            .await;
        assert!(matches!(result, Err(ArticleError::NotFound)));
    }
}
