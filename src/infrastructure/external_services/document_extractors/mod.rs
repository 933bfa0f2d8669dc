pub mod composite_extractor;
pub mod html_extractor;
pub mod pdf_extractor;
pub mod text_extractor;

pub use composite_extractor::CompositeDocumentExtractor;
pub use html_extractor::HtmlExtractor;
pub use pdf_extractor::PdfExtractor;
pub use text_extractor::PlainTextExtractor;
