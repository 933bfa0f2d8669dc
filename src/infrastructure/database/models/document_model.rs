use chrono::{DateTime, Utc};
use diesel::prelude::*;
use pgvector::Vector;

use crate::domain::entities::{DocumentRecord, NewDocumentRecord};
use crate::infrastructure::database::schema::documents;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentModel {
    pub id: i64,
    pub user_id: String,
    pub filename: String,
    pub content: String,
    pub embedding: Vector,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocumentModel {
    pub user_id: String,
    pub filename: String,
    pub content: String,
    pub embedding: Vector,
}

impl From<&NewDocumentRecord> for NewDocumentModel {
    fn from(record: &NewDocumentRecord) -> Self {
        Self {
            user_id: record.user_id.clone(),
            filename: record.filename.clone(),
            content: record.content.clone(),
            embedding: Vector::from(&record.embedding),
        }
    }
}

impl From<DocumentModel> for DocumentRecord {
    fn from(model: DocumentModel) -> Self {
        DocumentRecord::new(
            model.id,
            model.user_id,
            model.filename,
            model.content,
            model.embedding.into(),
            model.created_at,
        )
    }
}
