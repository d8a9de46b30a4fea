use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// One row of the report. Constructed per API node, filtered immediately,
/// and consumed once by the CSV writer at the end of the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PullRequestRecord {
    pub title: String,
    pub link: String,
    pub merged: bool,
    #[serde(serialize_with = "serialize_rfc3339_utc")]
    pub updated: DateTime<Utc>,
}

/// Render timestamps the way GitHub does: RFC 3339, seconds precision,
/// trailing Z
fn serialize_rfc3339_utc<S: Serializer>(
    value: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Top-level GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse {
    pub data: Option<ResponseData>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ResponseData {
    pub repository: Option<Repository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub pull_requests: PullRequestConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestConnection {
    pub page_info: PageInfo,
    pub nodes: Vec<PrNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// One pull request node as returned by the GraphQL query
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrNode {
    pub title: String,
    pub url: String,
    pub merged: bool,
    pub merged_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    pub state: String,
}

impl PrNode {
    /// A PR stays in the report if it was merged or is still open.
    /// Closed-without-merge PRs are dropped even when updated in-window.
    pub fn is_reportable(&self) -> bool {
        self.merged || self.state == "OPEN"
    }

    pub fn to_record(&self) -> PullRequestRecord {
        PullRequestRecord {
            title: self.title.clone(),
            link: self.url.clone(),
            merged: self.merged,
            updated: self.updated_at,
        }
    }
}
