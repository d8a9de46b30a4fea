pub mod client;
pub mod fetch;
pub mod types;

pub use client::GithubClient;
pub use fetch::fetch_recent_prs;
pub use types::PullRequestRecord;
