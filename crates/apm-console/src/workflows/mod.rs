pub mod application;
pub mod listing;
