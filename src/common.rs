pub mod error;
pub mod json;
pub mod messages;
pub mod pagination;
pub mod upload;
