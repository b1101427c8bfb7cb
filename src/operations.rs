//! The four GraphQL documents this client speaks, with their variables.
//!
//! Field selections are part of the wire contract with the GitHub API and
//! must stay in sync with the types in `crate::types` and `crate::responses`.

use std::fmt;
use std::str::FromStr;

use const_format::concatcp;
use serde::{Serialize, Serializer};
use serde_json::json;
use tracing::debug;

use crate::error::GhError;
use crate::types::ReactionContent;

/// Number of issues requested per page.
pub const ISSUES_PER_PAGE: u32 = 5;

/// Number of most recent reactions requested per issue.
pub const REACTIONS_PER_ISSUE: u32 = 3;

const GET_ISSUES_OF_REPOSITORY_QUERY: &str = concatcp!(
    r#"
query ($organization: String!, $repository: String!, $cursor: String) {
    organization(login: $organization) {
        name
        url
        description
        email
        repository(name: $repository) {
            name
            url
            description
            id
            stargazers {
                totalCount
            }
            viewerHasStarred
            issues(first: "#,
    ISSUES_PER_PAGE,
    r#", after: $cursor, states: [OPEN]) {
                totalCount
                edges {
                    node {
                        id
                        title
                        url
                        reactions(last: "#,
    REACTIONS_PER_ISSUE,
    r#") {
                            edges {
                                node {
                                    id
                                    content
                                }
                            }
                        }
                    }
                }
                pageInfo {
                    endCursor
                    hasNextPage
                }
            }
        }
    }
}
"#
);

const ADD_STAR_MUTATION: &str = r#"
mutation ($repoId: ID!) {
    addStar(input: { starrableId: $repoId }) {
        starrable {
            viewerHasStarred
        }
    }
}
"#;

const REMOVE_STAR_MUTATION: &str = r#"
mutation ($repoId: ID!) {
    removeStar(input: { starrableId: $repoId }) {
        starrable {
            viewerHasStarred
        }
    }
}
"#;

const ADD_REACTION_MUTATION: &str = r#"
mutation ($nodeId: ID!, $content: ReactionContent!) {
    addReaction(input: { subjectId: $nodeId, content: $content }) {
        reaction {
            id
            content
        }
    }
}
"#;

/// A GraphQL document paired with its variables. Building one has no side
/// effects; `GitHubClient::execute` sends it.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub name: &'static str,
    pub query: &'static str,
    pub variables: serde_json::Value,
}

/// An `owner/name` repository path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPath {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoPath {
    type Err = GhError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (owner, name) = trimmed
            .split_once('/')
            .ok_or_else(|| GhError::InvalidPath(s.to_string()))?;

        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(GhError::InvalidPath(s.to_string()));
        }

        debug!(owner, name, "Parsed repository path");
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl Serialize for RepoPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

pub fn fetch_issues_page(path: &RepoPath, cursor: Option<&str>) -> Operation {
    Operation {
        name: "FetchIssuesPage",
        query: GET_ISSUES_OF_REPOSITORY_QUERY,
        variables: json!({
            "organization": path.owner,
            "repository": path.name,
            "cursor": cursor,
        }),
    }
}

pub fn add_star(repo_id: &str) -> Operation {
    Operation {
        name: "AddStar",
        query: ADD_STAR_MUTATION,
        variables: json!({ "repoId": repo_id }),
    }
}

pub fn remove_star(repo_id: &str) -> Operation {
    Operation {
        name: "RemoveStar",
        query: REMOVE_STAR_MUTATION,
        variables: json!({ "repoId": repo_id }),
    }
}

pub fn add_reaction(node_id: &str, content: ReactionContent) -> Operation {
    Operation {
        name: "AddReaction",
        query: ADD_REACTION_MUTATION,
        variables: json!({ "nodeId": node_id, "content": content }),
    }
}
