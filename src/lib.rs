//! Export recently merged or open GitHub pull requests as CSV.

pub mod config;
pub mod github;
pub mod output;
