use serde::{Deserialize, Serialize};

use super::IssueEdge;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Repository {
    pub id: String,
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    #[serde(rename = "viewerHasStarred")]
    pub viewer_has_starred: bool,
    pub stargazers: Stargazers,
    pub issues: IssueConnection,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stargazers {
    #[serde(rename = "totalCount")]
    pub total_count: u32,
}

/// One page (or several appended pages) of open issues.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct IssueConnection {
    /// Server-side count of open issues, never recomputed from `edges`.
    #[serde(rename = "totalCount")]
    pub total_count: u32,
    #[serde(default, deserialize_with = "super::issue::resolved_edges")]
    pub edges: Vec<IssueEdge>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

/// Pagination info for cursor-based pagination.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
}
