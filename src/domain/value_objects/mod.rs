pub mod embedding_vector;

pub use embedding_vector::EmbeddingVector;
