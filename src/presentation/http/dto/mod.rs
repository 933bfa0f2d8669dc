pub mod file_dto;
pub mod query_dto;
pub mod response_dto;

pub use file_dto::*;
pub use query_dto::*;
pub use response_dto::*;
