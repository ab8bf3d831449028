//! Article Routers
//!
//! Both routers expect the caller to add authentication.

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::domain::repository::ArticleRepository;
use crate::presentation::handlers::{self, ArticleAppState};

/// Article CRUD routes
pub fn articles_router<R>(repo: R) -> Router
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/articles",
            get(handlers::list_articles::<R>).post(handlers::create_article::<R>),
        )
        .route(
            "/articles/{id}",
            get(handlers::get_article::<R>)
                .put(handlers::replace_article::<R>)
                .patch(handlers::patch_article::<R>)
                .delete(handlers::delete_article::<R>),
        )
        .with_state(ArticleAppState {
            repo: Arc::new(repo),
        })
}

/// Read-only admin listing
pub fn admin_router<R>(repo: R) -> Router
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/admin/articles", get(handlers::admin_list_articles::<R>))
        .with_state(ArticleAppState {
            repo: Arc::new(repo),
        })
}
