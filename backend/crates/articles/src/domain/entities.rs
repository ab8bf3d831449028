//! Domain Entities

use kernel::id::ArticleId;

use crate::domain::value_objects::{ArticleDescription, ArticleTitle};

/// Stored article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub description: ArticleDescription,
}

impl Article {
    pub fn apply(&mut self, patch: ArticlePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

/// Article not yet stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub description: ArticleDescription,
}

impl NewArticle {
    pub fn into_article(self, id: ArticleId) -> Article {
        Article {
            id,
            title: self.title,
            description: self.description,
        }
    }
}

/// Fields to change; `None` leaves a field as is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlePatch {
    pub title: Option<ArticleTitle>,
    pub description: Option<ArticleDescription>,
}

/// Admin listing filter; every given field must match exactly
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl ArticleFilter {
    pub fn matches(&self, article: &Article) -> bool {
        self.title
            .as_deref()
            .is_none_or(|t| article.title.as_str() == t)
            && self
                .description
                .as_deref()
                .is_none_or(|d| article.description.as_str() == d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: i64, title: &str, description: &str) -> Article {
        NewArticle {
            title: ArticleTitle::new(title).unwrap(),
            description: ArticleDescription::new(description).unwrap(),
        }
        .into_article(ArticleId::from_i64(id))
    }

    #[test]
    fn test_patch_keeps_missing_fields() {
        let mut a = article(1, "Hello", "World");
        a.apply(ArticlePatch {
            title: Some(ArticleTitle::new("X").unwrap()),
            description: None,
        });
        assert_eq!(a.title.as_str(), "X");
        assert_eq!(a.description.as_str(), "World");
    }

    #[test]
    fn test_filter_matches_exactly_and_combines() {
        let a = article(1, "Hello", "World");

        assert!(ArticleFilter::default().matches(&a));
        assert!(
            ArticleFilter {
                title: Some("Hello".into()),
                description: Some("World".into()),
            }
            .matches(&a)
        );
        assert!(
            !ArticleFilter {
                title: Some("hello".into()),
                description: None,
            }
            .matches(&a)
        );
        assert!(
            !ArticleFilter {
                title: Some("Hello".into()),
                description: Some("Other".into()),
            }
            .matches(&a)
        );
    }
}
