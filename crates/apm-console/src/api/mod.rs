//! Typed access to the remote credit application API.

mod client;
mod endpoints;
mod error;

pub use client::ApiClient;
pub use endpoints::{ListEndpoint, PageQuery};
pub use error::ApiError;
