//! API request/response types

pub mod chat;
pub mod error;

pub use chat::{ChatRequest, ChatResponse};
pub use error::{ApiError, ApiErrorResponse};
