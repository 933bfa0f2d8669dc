use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_objects::EmbeddingVector;

/// A chunk record before the store assigns it an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocumentRecord {
    pub user_id: String,
    pub filename: String,
    pub content: String,
    pub embedding: EmbeddingVector,
}

impl NewDocumentRecord {
    pub fn new(
        user_id: impl Into<String>,
        filename: impl Into<String>,
        content: impl Into<String>,
        embedding: EmbeddingVector,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            filename: filename.into(),
            content: content.into(),
            embedding,
        }
    }
}

/// A persisted chunk record. Records are write-once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRecord {
    id: i64,
    user_id: String,
    filename: String,
    content: String,
    embedding: EmbeddingVector,
    created_at: DateTime<Utc>,
}

impl DocumentRecord {
    pub fn new(
        id: i64,
        user_id: String,
        filename: String,
        content: String,
        embedding: EmbeddingVector,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            filename,
            content,
            embedding,
            created_at,
        }
    }

    pub fn from_new(id: i64, record: NewDocumentRecord) -> Self {
        Self::new(
            id,
            record.user_id,
            record.filename,
            record.content,
            record.embedding,
            Utc::now(),
        )
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn embedding(&self) -> &EmbeddingVector {
        &self.embedding
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn belongs_to(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}
