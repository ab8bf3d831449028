//! Domain Layer
//!
//! Entities, value objects, and the repository trait.

pub mod entities;
pub mod repository;
pub mod value_objects;

pub use entities::{Article, ArticleFilter, ArticlePatch, NewArticle};
pub use repository::ArticleRepository;
pub use value_objects::{ArticleDescription, ArticleTitle, FieldValueError, TITLE_MAX_LENGTH};
