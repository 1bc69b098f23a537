pub mod client;
pub mod error;

pub use client::{HttpTaskStore, TaskStore};
pub use error::ApiError;
