//! Create Article Use Case

use kernel::validation::{FieldErrors, messages};
use std::sync::Arc;

use crate::domain::entities::{Article, ArticlePatch, NewArticle};
use crate::domain::repository::ArticleRepository;
use crate::domain::value_objects::{ArticleDescription, ArticleTitle};
use crate::error::{ArticleError, ArticleResult};

/// Validated article fields from a write request; `None` means "not sent"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleInput {
    pub title: Option<ArticleTitle>,
    pub description: Option<ArticleDescription>,
}

impl ArticleInput {
    /// Both fields, or a `REQUIRED` error for each missing one
    pub fn into_new_article(self) -> Result<NewArticle, FieldErrors> {
        match (self.title, self.description) {
            (Some(title), Some(description)) => Ok(NewArticle { title, description }),
            (title, description) => {
                let mut errors = FieldErrors::new();
                if title.is_none() {
                    errors.add("title", messages::REQUIRED);
                }
                if description.is_none() {
                    errors.add("description", messages::REQUIRED);
                }
                Err(errors)
            }
        }
    }

    pub fn into_patch(self) -> ArticlePatch {
        ArticlePatch {
            title: self.title,
            description: self.description,
        }
    }
}

/// Create article use case
pub struct CreateArticleUseCase<R>
where
    R: ArticleRepository,
{
    repo: Arc<R>,
}

impl<R> CreateArticleUseCase<R>
where
    R: ArticleRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: ArticleInput) -> ArticleResult<Article> {
        let new_article = input.into_new_article().map_err(ArticleError::Validation)?;
        let article = self.repo.create(new_article).await?;

        tracing::info!(article_id = %article.id, "Article created");

        Ok(article)
    }
}

#[cfg(test)]
mod create_article_tests {
    use super::*;
    use crate::infra::memory::InMemoryArticleRepository;

    fn input(title: &str, description: &str) -> ArticleInput {
        ArticleInput {
            title: Some(ArticleTitle::new(title).unwrap()),
            description: Some(ArticleDescription::new(description).unwrap()),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_ids() {
        let repo = Arc::new(InMemoryArticleRepository::new());
        let use_case = CreateArticleUseCase::new(repo.clone());

        let first = use_case.execute(input("Hello", "World")).await.unwrap();
        let second = use_case.execute(input("Hello", "World")).await.unwrap();

        assert_eq!(first.id.as_i64(), 1);
        assert_eq!(second.id.as_i64(), 2);
        assert_eq!(first.title.as_str(), "Hello");
        assert_eq!(first.description.as_str(), "World");
        assert_eq!(repo.find_by_id(first.id).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_missing_fields_are_all_reported() {
        let repo = Arc::new(InMemoryArticleRepository::new());
        let use_case = CreateArticleUseCase::new(repo.clone());

        let err = use_case.execute(ArticleInput::default()).await.unwrap_err();
        let ArticleError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["description", "title"]);
        assert!(repo.list().await.unwrap().is_empty());
    }
}
