//! Credit application console: form gating, paginated list views and the
//! apply-then-sign workflow against the remote credit application API.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod telemetry;
pub mod workflows;
