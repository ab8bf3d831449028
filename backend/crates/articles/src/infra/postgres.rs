//! PostgreSQL Article Repository

use kernel::id::ArticleId;
use sqlx::PgPool;

use crate::domain::entities::{Article, ArticleFilter, ArticlePatch, NewArticle};
use crate::domain::repository::ArticleRepository;
use crate::domain::value_objects::{ArticleDescription, ArticleTitle};
use crate::error::ArticleResult;

/// PostgreSQL-backed article repository
#[derive(Clone)]
pub struct PgArticleRepository {
    pool: PgPool,
}

impl PgArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ArticleRepository for PgArticleRepository {
    async fn create(&self, article: NewArticle) -> ArticleResult<Article> {
        let row = sqlx::query_as::<_, ArticleRow>(
            r#"
            INSERT INTO articles (title, description)
            VALUES ($1, $2)
            RETURNING id, title, description
            "#,
        )
        .bind(article.title.as_str())
        .bind(article.description.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_article())
    }

    async fn find_by_id(&self, id: ArticleId) -> ArticleResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(
            "SELECT id, title, description FROM articles WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ArticleRow::into_article))
    }

    async fn list(&self) -> ArticleResult<Vec<Article>> {
        let rows = sqlx::query_as::<_, ArticleRow>(
            "SELECT id, title, description FROM articles ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ArticleRow::into_article).collect())
    }

    async fn filter(&self, filter: &ArticleFilter) -> ArticleResult<Vec<Article>> {
        let rows = sqlx::query_as::<_, ArticleRow>(
            r#"
            SELECT id, title, description
            FROM articles
            WHERE ($1::TEXT IS NULL OR title = $1)
              AND ($2::TEXT IS NULL OR description = $2)
            ORDER BY id
            "#,
        )
        .bind(filter.title.as_deref())
        .bind(filter.description.as_deref())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ArticleRow::into_article).collect())
    }

    async fn update(&self, id: ArticleId, patch: ArticlePatch) -> ArticleResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(
            r#"
            UPDATE articles
            SET title = COALESCE($2, title),
                description = COALESCE($3, description)
            WHERE id = $1
            RETURNING id, title, description
            "#,
        )
        .bind(id.as_i64())
        .bind(patch.title.as_ref().map(ArticleTitle::as_str))
        .bind(patch.description.as_ref().map(ArticleDescription::as_str))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ArticleRow::into_article))
    }

    async fn delete(&self, id: ArticleId) -> ArticleResult<bool> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    description: String,
}

impl ArticleRow {
    fn into_article(self) -> Article {
        Article {
            id: ArticleId::from_i64(self.id),
            title: ArticleTitle::from_db(self.title),
            description: ArticleDescription::from_db(self.description),
        }
    }
}
