pub mod file_routes;
pub mod health_routes;
pub mod query_routes;
pub mod scrape_routes;

pub use file_routes::*;
pub use health_routes::*;
pub use query_routes::*;
pub use scrape_routes::*;
