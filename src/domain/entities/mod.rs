pub mod document_record;
pub mod text_chunk;
pub mod uploaded_file;

pub use document_record::{DocumentRecord, NewDocumentRecord};
pub use text_chunk::TextChunk;
pub use uploaded_file::UploadedFile;
