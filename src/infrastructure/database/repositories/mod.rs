pub mod memory_document_repository;
pub mod postgres_document_repository;

pub use memory_document_repository::MemoryDocumentRepository;
pub use postgres_document_repository::PostgresDocumentRepository;
