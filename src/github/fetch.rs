use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};

use crate::github::client::GithubClient;
use crate::github::types::{PrNode, PullRequestRecord};

/// Pull requests per page, newest-updated first. The descending order is
/// what lets the walk stop at the first out-of-window node.
pub const PR_QUERY: &str = r#"
query($owner: String!, $repo: String!, $cursor: String) {
  repository(owner: $owner, name: $repo) {
    pullRequests(first: 100, after: $cursor, orderBy: {field: UPDATED_AT, direction: DESC}) {
      pageInfo {
        hasNextPage
        endCursor
      }
      nodes {
        title
        url
        merged
        mergedAt
        updatedAt
        state
      }
    }
  }
}
"#;

/// Scan one page of nodes in order. Returns the retained records and
/// whether the walk is finished.
///
/// The first node strictly older than `cutoff` ends the walk; every node
/// after it on the page is older still and is never examined. In-window
/// nodes are kept only when merged or still open.
pub fn filter_page(
    nodes: &[PrNode],
    cutoff: DateTime<Utc>,
) -> (Vec<PullRequestRecord>, bool) {
    let mut records = Vec::new();

    for node in nodes {
        if node.updated_at < cutoff {
            return (records, true);
        }
        if node.is_reportable() {
            records.push(node.to_record());
        }
    }

    (records, false)
}

/// Walk the cursor-paginated PR listing until it ages out of the window.
/// Records accumulate in page order (descending updatedAt).
pub async fn fetch_recent_prs(
    client: &GithubClient,
    owner: &str,
    repo: &str,
    cutoff: DateTime<Utc>,
    verbose: bool,
) -> Result<Vec<PullRequestRecord>> {
    let mut all_records = Vec::new();
    let mut cursor: Option<String> = None;
    let mut page_number = 0u32;

    loop {
        let variables = serde_json::json!({
            "owner": owner,
            "repo": repo,
            "cursor": cursor,
        });

        let response = client.graphql(PR_QUERY, variables).await?;
        page_number += 1;

        if !response.errors.is_empty() {
            let messages: Vec<_> = response
                .errors
                .iter()
                .map(|e| e.message.clone())
                .collect();
            return Err(anyhow!("GraphQL errors: {}", messages.join("; ")));
        }

        let repository = response
            .data
            .and_then(|data| data.repository)
            .ok_or_else(|| anyhow!("Repository not accessible"))?;

        let connection = repository.pull_requests;
        let (records, finished) = filter_page(&connection.nodes, cutoff);

        if verbose {
            eprintln!(
                "Page {}: {} nodes, {} kept",
                page_number,
                connection.nodes.len(),
                records.len()
            );
        }

        all_records.extend(records);

        if finished || !connection.page_info.has_next_page {
            break;
        }
        cursor = connection.page_info.end_cursor;
    }

    Ok(all_records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_node(updated_at: DateTime<Utc>, state: &str, merged: bool) -> PrNode {
        PrNode {
            title: format!("PR updated {}", updated_at),
            url: "https://github.com/NixOS/nixpkgs/pull/1".to_string(),
            merged,
            merged_at: None,
            updated_at,
            state: state.to_string(),
        }
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_keeps_merged_and_open_in_window() {
        let cutoff = at(1);
        let nodes = vec![
            make_node(at(15), "MERGED", true),
            make_node(at(10), "OPEN", false),
        ];

        let (records, finished) = filter_page(&nodes, cutoff);
        assert_eq!(records.len(), 2);
        assert!(records[0].merged);
        assert!(!records[1].merged);
        assert!(!finished);
    }

    #[test]
    fn test_drops_closed_unmerged_in_window() {
        let cutoff = at(1);
        let nodes = vec![
            make_node(at(15), "MERGED", true),
            make_node(at(10), "CLOSED", false),
        ];

        let (records, finished) = filter_page(&nodes, cutoff);
        assert_eq!(records.len(), 1);
        assert!(!finished);
    }

    #[test]
    fn test_stops_at_first_node_older_than_cutoff() {
        let cutoff = at(10);
        let nodes = vec![
            make_node(at(15), "MERGED", true),
            make_node(at(5), "CLOSED", false),
            // Never reached; would be kept if it were
            make_node(at(2), "OPEN", false),
        ];

        let (records, finished) = filter_page(&nodes, cutoff);
        assert_eq!(records.len(), 1);
        assert!(finished);
    }

    #[test]
    fn test_node_exactly_at_cutoff_is_in_window() {
        let cutoff = at(10);
        let nodes = vec![make_node(at(10), "OPEN", false)];

        let (records, finished) = filter_page(&nodes, cutoff);
        assert_eq!(records.len(), 1);
        assert!(!finished);
    }

    #[test]
    fn test_empty_page() {
        let (records, finished) = filter_page(&[], at(1));
        assert!(records.is_empty());
        assert!(!finished);
    }

    #[test]
    fn test_records_preserve_page_order() {
        let cutoff = at(1);
        let nodes = vec![
            make_node(at(20), "OPEN", false),
            make_node(at(15), "MERGED", true),
            make_node(at(10), "OPEN", false),
        ];

        let (records, _) = filter_page(&nodes, cutoff);
        let updated: Vec<_> = records.iter().map(|r| r.updated).collect();
        assert_eq!(updated, vec![at(20), at(15), at(10)]);
    }
}
