//! In-memory Article Repository
//!
//! Ids start at 1 and are never reused, even after a delete.

use kernel::id::ArticleId;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{Article, ArticleFilter, ArticlePatch, NewArticle};
use crate::domain::repository::ArticleRepository;
use crate::error::ArticleResult;

#[derive(Default)]
struct ArticleStore {
    articles: BTreeMap<ArticleId, Article>,
    last_id: i64,
}

#[derive(Clone, Default)]
pub struct InMemoryArticleRepository {
    store: Arc<RwLock<ArticleStore>>,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArticleRepository for InMemoryArticleRepository {
    async fn create(&self, article: NewArticle) -> ArticleResult<Article> {
        let mut store = self.store.write().await;

        store.last_id += 1;
        let id = ArticleId::from_i64(store.last_id);
        let article = article.into_article(id);
        store.articles.insert(id, article.clone());

        Ok(article)
    }

    async fn find_by_id(&self, id: ArticleId) -> ArticleResult<Option<Article>> {
        Ok(self.store.read().await.articles.get(&id).cloned())
    }

    async fn list(&self) -> ArticleResult<Vec<Article>> {
        Ok(self.store.read().await.articles.values().cloned().collect())
    }

    async fn filter(&self, filter: &ArticleFilter) -> ArticleResult<Vec<Article>> {
        let store = self.store.read().await;
        Ok(store
            .articles
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect())
    }

    async fn update(&self, id: ArticleId, patch: ArticlePatch) -> ArticleResult<Option<Article>> {
        let mut store = self.store.write().await;

        let Some(article) = store.articles.get_mut(&id) else {
            return Ok(None);
        };
        article.apply(patch);

        Ok(Some(article.clone()))
    }

    async fn delete(&self, id: ArticleId) -> ArticleResult<bool> {
        Ok(self.store.write().await.articles.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{ArticleDescription, ArticleTitle};

    fn new_article(title: &str) -> NewArticle {
        NewArticle {
            title: ArticleTitle::new(title).unwrap(),
            description: ArticleDescription::new("body").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_never_reused() {
        let repo = InMemoryArticleRepository::new();

        let a = repo.create(new_article("a")).await.unwrap();
        let b = repo.create(new_article("b")).await.unwrap();
        assert_eq!(a.id.as_i64(), 1);
        assert_eq!(b.id.as_i64(), 2);

        assert!(repo.delete(b.id).await.unwrap());
        assert!(!repo.delete(b.id).await.unwrap());

        let c = repo.create(new_article("c")).await.unwrap();
        assert_eq!(c.id.as_i64(), 3);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = InMemoryArticleRepository::new();
        for title in ["z", "a", "m"] {
            repo.create(new_article(title)).await.unwrap();
        }

        let ids: Vec<i64> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|a| a.id.as_i64())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let repo = InMemoryArticleRepository::new();
        let result = repo
            .update(ArticleId::from_i64(7), ArticlePatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_the_store() {
        let repo = InMemoryArticleRepository::new();
        let other = repo.clone();
        let a = repo.create(new_article("a")).await.unwrap();
        assert_eq!(other.find_by_id(a.id).await.unwrap(), Some(a));
    }
}
