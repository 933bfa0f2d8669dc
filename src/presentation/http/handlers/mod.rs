pub mod file_handler;
pub mod query_handler;
pub mod scrape_handler;

pub use file_handler::FileHandler;
pub use query_handler::QueryHandler;
pub use scrape_handler::ScrapeHandler;
