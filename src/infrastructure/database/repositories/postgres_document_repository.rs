use async_trait::async_trait;
use diesel::prelude::*;
use pgvector::{Vector, VectorExpressionMethods};

use crate::domain::entities::NewDocumentRecord;
use crate::domain::repositories::DocumentRepository;
use crate::domain::repositories::document_repository::{DocumentRepositoryError, ScoredDocument};
use crate::domain::value_objects::EmbeddingVector;
use crate::infrastructure::database::models::{DocumentModel, NewDocumentModel};
use crate::infrastructure::database::schema::documents;
use crate::infrastructure::database::{DbPool, connection::get_connection_from_pool};

/// Document store backed by Postgres with the pgvector extension.
///
/// Diesel is synchronous, so every query runs on the blocking thread pool
/// with its own pooled connection.
pub struct PostgresDocumentRepository {
    pool: DbPool,
}

impl PostgresDocumentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn with_connection<T, F>(&self, operation: F) -> Result<T, DocumentRepositoryError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> QueryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = get_connection_from_pool(&pool)?;

            operation(&mut conn).map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))
        })
        .await
        .map_err(|e| DocumentRepositoryError::DatabaseError(format!("Query task failed: {}", e)))?
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn store_document(
        &self,
        record: &NewDocumentRecord,
    ) -> Result<i64, DocumentRepositoryError> {
        let new_document = NewDocumentModel::from(record);

        self.with_connection(move |conn| {
            diesel::insert_into(documents::table)
                .values(&new_document)
                .returning(documents::id)
                .get_result::<i64>(conn)
        })
        .await
    }

    async fn similarity_search(
        &self,
        query_vector: &EmbeddingVector,
        user_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ScoredDocument>, DocumentRepositoryError> {
        let query = Vector::from(query_vector);
        let user_filter = user_id.map(|uid| uid.to_string());
        let limit = i64::try_from(limit)
            .map_err(|e| DocumentRepositoryError::ValidationError(e.to_string()))?;

        let rows = self
            .with_connection(move |conn| {
                let mut statement = documents::table
                    .select((
                        DocumentModel::as_select(),
                        documents::embedding.cosine_distance(query.clone()),
                    ))
                    .order(documents::embedding.cosine_distance(query))
                    .limit(limit)
                    .into_boxed();

                if let Some(uid) = user_filter {
                    statement = statement.filter(documents::user_id.eq(uid));
                }

                statement.load::<(DocumentModel, f64)>(conn)
            })
            .await?;

        Ok(rows
            .into_iter()
            .map(|(model, distance)| ScoredDocument {
                document: model.into(),
                similarity_score: (1.0 - distance) as f32,
            })
            .collect())
    }

    async fn count(&self) -> Result<i64, DocumentRepositoryError> {
        self.with_connection(|conn| documents::table.count().get_result(conn))
            .await
    }
}
