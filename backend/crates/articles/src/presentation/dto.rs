//! API DTOs (Data Transfer Objects)

use kernel::id::ArticleId;
use kernel::validation::{FieldErrors, FieldReader, WriteMode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::{AdminListing, ArticleInput};
use crate::domain::entities::{Article, ArticleFilter};
use crate::domain::value_objects::{ArticleDescription, ArticleTitle};

/// Read an article write body
///
/// Create and replace need both fields; partial takes any subset.
pub fn parse_article_input(body: &Value, mode: WriteMode) -> Result<ArticleInput, FieldErrors> {
    let mut reader = FieldReader::new(body, mode)?;
    let mut input = ArticleInput::default();

    if let Some(raw) = reader.required_string("title") {
        match ArticleTitle::new(raw) {
            Ok(title) => input.title = Some(title),
            Err(e) => reader.reject("title", e.to_string()),
        }
    }
    if let Some(raw) = reader.required_string("description") {
        match ArticleDescription::new(raw) {
            Ok(description) => input.description = Some(description),
            Err(e) => reader.reject("description", e.to_string()),
        }
    }

    reader.finish()?;
    Ok(input)
}

/// Article response
#[derive(Debug, Clone, Serialize)]
pub struct ArticleResponse {
    pub id: ArticleId,
    pub title: String,
    pub description: String,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            title: article.title.into_inner(),
            description: article.description.into_inner(),
        }
    }
}

// ============================================================================
// Admin listing
// ============================================================================

/// `?title=&description=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminListingQuery {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl From<AdminListingQuery> for ArticleFilter {
    fn from(query: AdminListingQuery) -> Self {
        Self {
            title: query.title,
            description: query.description,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminFilterChoices {
    pub title: Vec<String>,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminListingResponse {
    pub count: usize,
    pub results: Vec<ArticleResponse>,
    pub filters: AdminFilterChoices,
}

impl From<AdminListing> for AdminListingResponse {
    fn from(listing: AdminListing) -> Self {
        Self {
            count: listing.count(),
            results: listing.results.into_iter().map(ArticleResponse::from).collect(),
            filters: AdminFilterChoices {
                title: listing.titles,
                description: listing.descriptions,
            },
        }
    }
}
