pub mod auth;
pub mod detail;
pub mod search;
