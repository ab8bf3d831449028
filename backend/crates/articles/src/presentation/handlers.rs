//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::id::ArticleId;
use kernel::validation::WriteMode;
use serde_json::Value;
use std::sync::Arc;

use crate::application::{
    AdminListingUseCase, CreateArticleUseCase, DeleteArticleUseCase, GetArticleUseCase,
    ListArticlesUseCase, UpdateArticleUseCase,
};
use crate::domain::repository::ArticleRepository;
use crate::error::{ArticleError, ArticleResult};
use crate::presentation::dto::{
    AdminListingQuery, AdminListingResponse, ArticleResponse, parse_article_input,
};

/// Shared state for article handlers
#[derive(Clone)]
pub struct ArticleAppState<R>
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// Unparsable ids cannot name a stored article
fn parse_article_id(raw: &str) -> ArticleResult<ArticleId> {
    raw.parse().map_err(|_| ArticleError::NotFound)
}

/// GET /articles
pub async fn list_articles<R>(
    State(state): State<ArticleAppState<R>>,
) -> ArticleResult<Json<Vec<ArticleResponse>>>
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    let articles = ListArticlesUseCase::new(state.repo.clone()).execute().await?;
    Ok(Json(articles.into_iter().map(ArticleResponse::from).collect()))
}

/// POST /articles
pub async fn create_article<R>(
    State(state): State<ArticleAppState<R>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ArticleResult<impl IntoResponse>
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    let Json(body) = payload?;
    let input = parse_article_input(&body, WriteMode::Create)?;

    let article = CreateArticleUseCase::new(state.repo.clone())
        .execute(input)
        .await?;

    Ok((StatusCode::CREATED, Json(ArticleResponse::from(article))))
}

/// GET /articles/{id}
pub async fn get_article<R>(
    State(state): State<ArticleAppState<R>>,
    Path(id): Path<String>,
) -> ArticleResult<Json<ArticleResponse>>
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    let id = parse_article_id(&id)?;
    let article = GetArticleUseCase::new(state.repo.clone()).execute(id).await?;
    Ok(Json(article.into()))
}

/// PUT /articles/{id}
pub async fn replace_article<R>(
    state: State<ArticleAppState<R>>,
    id: Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ArticleResult<Json<ArticleResponse>>
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    write_article(state, id, payload, WriteMode::Replace).await
}

/// PATCH /articles/{id}
pub async fn patch_article<R>(
    state: State<ArticleAppState<R>>,
    id: Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ArticleResult<Json<ArticleResponse>>
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    write_article(state, id, payload, WriteMode::Partial).await
}

async fn write_article<R>(
    State(state): State<ArticleAppState<R>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
    mode: WriteMode,
) -> ArticleResult<Json<ArticleResponse>>
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    let id = parse_article_id(&id)?;
    // A missing article is reported before any body problem
    GetArticleUseCase::new(state.repo.clone()).execute(id).await?;

    let Json(body) = payload?;
    let input = parse_article_input(&body, mode)?;

    let article = UpdateArticleUseCase::new(state.repo.clone())
        .execute(id, input)
        .await?;

    Ok(Json(article.into()))
}

/// DELETE /articles/{id}
pub async fn delete_article<R>(
    State(state): State<ArticleAppState<R>>,
    Path(id): Path<String>,
) -> ArticleResult<StatusCode>
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    let id = parse_article_id(&id)?;
    DeleteArticleUseCase::new(state.repo.clone()).execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /admin/articles
pub async fn admin_list_articles<R>(
    State(state): State<ArticleAppState<R>>,
    query: Result<Query<AdminListingQuery>, QueryRejection>,
) -> ArticleResult<Json<AdminListingResponse>>
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    let Query(query) = query?;
    let listing = AdminListingUseCase::new(state.repo.clone())
        .execute(query.into())
        .await?;
    Ok(Json(listing.into()))
}
