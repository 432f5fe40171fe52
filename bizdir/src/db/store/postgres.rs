//! PostgreSQL-backed document store.
//!
//! Every collection lives in the single `documents` table as JSONB bodies keyed by
//! `(collection, id)`. Equality filters become containment queries (`body @> $filter`), which the
//! GIN index on `body` serves. Unique indexes from [`Collection::unique_indexes`] are created as
//! partial expression indexes by the migrations, so PostgreSQL rejects conflicting writers.

use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, QueryBuilder};
use std::time::Duration;
use tracing::instrument;

use super::{Document, DocumentStore, Filter, Sort, document_id};
use crate::config::PoolSettings;
use crate::db::errors::Result;
use crate::types::Collection;

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect with the given pool settings and bring the schema up to date
    pub async fn connect(url: &str, settings: &PoolSettings) -> anyhow::Result<Self> {
        let mut options = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs));

        // 0 disables the timeout
        if settings.idle_timeout_secs > 0 {
            options = options.idle_timeout(Duration::from_secs(settings.idle_timeout_secs));
        }
        if settings.max_lifetime_secs > 0 {
            options = options.max_lifetime(Duration::from_secs(settings.max_lifetime_secs));
        }

        let pool = options.connect(url).await?;
        crate::migrator().run(&pool).await?;

        Ok(Self::new(pool))
    }

    /// `SELECT <columns> FROM documents WHERE collection = $1 AND body @> $2`
    fn select<'a>(columns: &str, collection: Collection, filter: &Filter) -> QueryBuilder<'a, sqlx::Postgres> {
        let mut query = QueryBuilder::new(format!("SELECT {columns} FROM documents WHERE collection = "));
        query.push_bind(collection.as_str());
        query.push(" AND body @> ");
        query.push_bind(Json(filter.to_document()));
        query
    }

    /// Sub-select of the first matching id, used to make single-document writes atomic
    fn push_first_match_id(query: &mut QueryBuilder<'_, sqlx::Postgres>, collection: Collection, filter: &Filter) {
        query.push("(SELECT id FROM documents WHERE collection = ");
        query.push_bind(collection.as_str());
        query.push(" AND body @> ");
        query.push_bind(Json(filter.to_document()));
        query.push(" ORDER BY id LIMIT 1)");
    }
}

#[async_trait::async_trait]
impl DocumentStore for PostgresStore {
    #[instrument(skip(self, filter), fields(collection = %collection), err)]
    async fn find_page(&self, collection: Collection, filter: &Filter, skip: i64, limit: Option<i64>) -> Result<Vec<Document>> {
        let mut query = Self::select("body", collection, filter);
        query.push(" ORDER BY id OFFSET ");
        query.push_bind(skip.max(0));
        if let Some(limit) = limit {
            query.push(" LIMIT ");
            query.push_bind(limit.max(0));
        }

        let rows: Vec<(Json<Document>,)> = query.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(Json(body),)| body).collect())
    }

    #[instrument(skip(self, filter), fields(collection = %collection), err)]
    async fn count(&self, collection: Collection, filter: &Filter) -> Result<i64> {
        let mut query = Self::select("COUNT(*)", collection, filter);
        let count: i64 = query.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }

    #[instrument(skip(self, filter), fields(collection = %collection), err)]
    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>> {
        let mut query = Self::select("body", collection, filter);
        query.push(" ORDER BY id LIMIT 1");

        let row: Option<(Json<Document>,)> = query.build_query_as().fetch_optional(&self.pool).await?;
        Ok(row.map(|(Json(body),)| body))
    }

    #[instrument(skip(self, filter), fields(collection = %collection, sort = %sort.field), err)]
    async fn find_one_sorted(&self, collection: Collection, filter: &Filter, sort: &Sort) -> Result<Option<Document>> {
        let mut query = Self::select("body", collection, filter);
        // jsonb ordering compares numbers numerically
        query.push(" ORDER BY body -> ");
        query.push_bind(sort.field.clone());
        query.push(" DESC NULLS LAST, id ASC LIMIT 1");

        let row: Option<(Json<Document>,)> = query.build_query_as().fetch_optional(&self.pool).await?;
        Ok(row.map(|(Json(body),)| body))
    }

    #[instrument(skip(self, document), fields(collection = %collection), err)]
    async fn insert(&self, collection: Collection, document: Document) -> Result<Document> {
        let id = document_id(&document)?;

        let (Json(body),): (Json<Document>,) =
            sqlx::query_as("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3) RETURNING body")
                .bind(collection.as_str())
                .bind(id)
                .bind(Json(&document))
                .fetch_one(&self.pool)
                .await?;

        Ok(body)
    }

    #[instrument(skip(self, filter, patch), fields(collection = %collection), err)]
    async fn update_one(&self, collection: Collection, filter: &Filter, patch: Document) -> Result<Option<Document>> {
        let mut query = QueryBuilder::new("UPDATE documents SET body = body || ");
        query.push_bind(Json(&patch));
        query.push(", id = COALESCE((");
        query.push_bind(Json(&patch));
        query.push(" ->> 'id')::bigint, id) WHERE collection = ");
        query.push_bind(collection.as_str());
        query.push(" AND id = ");
        Self::push_first_match_id(&mut query, collection, filter);
        query.push(" RETURNING body");

        let row: Option<(Json<Document>,)> = query.build_query_as().fetch_optional(&self.pool).await?;
        Ok(row.map(|(Json(body),)| body))
    }

    #[instrument(skip(self, filter), fields(collection = %collection), err)]
    async fn delete_one(&self, collection: Collection, filter: &Filter) -> Result<bool> {
        let mut query = QueryBuilder::new("DELETE FROM documents WHERE collection = ");
        query.push_bind(collection.as_str());
        query.push(" AND id = ");
        Self::push_first_match_id(&mut query, collection, filter);

        let result = query.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, document), fields(collection = %collection), err)]
    async fn upsert_by_id(&self, collection: Collection, document: Document) -> Result<()> {
        let id = document_id(&document)?;

        sqlx::query(
            "INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)
             ON CONFLICT (collection, id) DO UPDATE SET body = EXCLUDED.body",
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(Json(&document))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
