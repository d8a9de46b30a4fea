use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};

/// Environment variable holding the GitHub API token
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// The repository the report covers
pub const REPO_OWNER: &str = "NixOS";
pub const REPO_NAME: &str = "nixpkgs";

/// Resolved runtime configuration. Built once in main and passed down
/// explicitly so the fetch path never reads process state.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub newer_than_days: u32,
    pub timeout: std::time::Duration,
}

impl Config {
    /// Cutoff timestamp: PRs last updated before this are out of the window
    pub fn cutoff(&self) -> DateTime<Utc> {
        self.cutoff_from(Utc::now())
    }

    /// Cutoff relative to an explicit "now" (used by tests)
    pub fn cutoff_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(i64::from(self.newer_than_days))
    }
}

/// Read the GitHub token from the GITHUB_TOKEN environment variable.
/// Absent or blank is an error; callers must fail before any network call.
pub fn token_from_env() -> Result<String> {
    token_from(std::env::var(GITHUB_TOKEN_VAR).ok())
}

/// Validate a raw token value. Separated from the env lookup so the rule
/// can be tested without mutating process environment.
pub fn token_from(raw: Option<String>) -> Result<String> {
    let value = raw.with_context(|| {
        format!("{} environment variable is required", GITHUB_TOKEN_VAR)
    })?;

    let trimmed = value.trim();
    if trimmed.is_empty() {
        anyhow::bail!("{} environment variable is empty", GITHUB_TOKEN_VAR);
    }

    Ok(trimmed.to_string())
}
