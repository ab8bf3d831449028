//! Admin Listing Use Case
//!
//! Filtered article rows plus the distinct values each filter can take.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::entities::{Article, ArticleFilter};
use crate::domain::repository::ArticleRepository;
use crate::error::ArticleResult;

/// Result of an admin listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminListing {
    /// Articles matching the filter, ordered by id
    pub results: Vec<Article>,
    /// Every distinct title in the store, sorted
    pub titles: Vec<String>,
    /// Every distinct description in the store, sorted
    pub descriptions: Vec<String>,
}

impl AdminListing {
    pub fn count(&self) -> usize {
        self.results.len()
    }
}

pub struct AdminListingUseCase<R>
where
    R: ArticleRepository,
{
    repo: Arc<R>,
}

impl<R> AdminListingUseCase<R>
where
    R: ArticleRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, filter: ArticleFilter) -> ArticleResult<AdminListing> {
        let results = self.repo.filter(&filter).await?;

        // Filter choices come from the whole table, not the filtered rows
        let all = self.repo.list().await?;
        let mut titles = BTreeSet::new();
        let mut descriptions = BTreeSet::new();
        for article in all {
            titles.insert(article.title.into_inner());
            descriptions.insert(article.description.into_inner());
        }

        tracing::debug!(
            title = ?filter.title,
            description = ?filter.description,
            count = results.len(),
            "Admin article listing"
        );

        Ok(AdminListing {
            results,
            titles: titles.into_iter().collect(),
            descriptions: descriptions.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod admin_listing_tests {
    use super::*;
    use crate::domain::entities::NewArticle;
    use crate::domain::value_objects::{ArticleDescription, ArticleTitle};
    use crate::infra::memory::InMemoryArticleRepository;

    async fn seeded() -> Arc<InMemoryArticleRepository> {
        let repo = Arc::new(InMemoryArticleRepository::new());
        for (title, description) in [("B", "one"), ("A", "two"), ("B", "two")] {
            repo.create(NewArticle {
                title: ArticleTitle::new(title).unwrap(),
                description: ArticleDescription::new(description).unwrap(),
            })
            .await
            .unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn test_unfiltered() {
        let listing = AdminListingUseCase::new(seeded().await)
            .execute(ArticleFilter::default())
            .await
            .unwrap();

        assert_eq!(listing.count(), 3);
        assert_eq!(listing.titles, vec!["A", "B"]);
        assert_eq!(listing.descriptions, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_filters_combine() {
        let use_case = AdminListingUseCase::new(seeded().await);

        let by_title = use_case
            .execute(ArticleFilter {
                title: Some("B".into()),
                description: None,
            })
            .await
            .unwrap();
        let ids: Vec<i64> = by_title.results.iter().map(|a| a.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 3]);
        // Choices are not narrowed by the active filter
        assert_eq!(by_title.titles, vec!["A", "B"]);

        let both = use_case
            .execute(ArticleFilter {
                title: Some("B".into()),
                description: Some("two".into()),
            })
            .await
            .unwrap();
        assert_eq!(both.count(), 1);
        assert_eq!(both.results[0].id.as_i64(), 3);

        let none = use_case
            .execute(ArticleFilter {
                title: Some("Z".into()),
                description: None,
            })
            .await
            .unwrap();
        assert_eq!(none.count(), 0);
    }
}
