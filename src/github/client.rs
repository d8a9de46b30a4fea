use anyhow::{Context, Result};
use std::time::Duration;

use crate::github::types::GraphqlResponse;

/// Default GraphQL endpoint
pub const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Authenticated GraphQL transport. One outbound POST per `graphql` call,
/// no retry.
pub struct GithubClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl GithubClient {
    /// Create a client for the public GitHub API with the given request timeout
    pub fn new(token: &str, timeout: Duration) -> Result<Self> {
        Self::with_endpoint(token, timeout, GITHUB_GRAPHQL_URL)
    }

    /// Create a client against an explicit endpoint (used by tests)
    pub fn with_endpoint(token: &str, timeout: Duration, endpoint: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            // GitHub rejects requests without a User-Agent
            .user_agent(concat!("pr-report/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            token: token.to_string(),
        })
    }

    /// Execute one GraphQL query. Any non-2xx status is an error carrying
    /// the status and the response body.
    pub async fn graphql(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<GraphqlResponse> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .context("Failed to reach the GitHub API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("GitHub API returned {}: {}", status, body);
        }

        response
            .json::<GraphqlResponse>()
            .await
            .context("Failed to parse GitHub API response")
    }
}
