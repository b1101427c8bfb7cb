use serde::{Deserialize, Deserializer, Serialize};

use super::Reaction;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct IssueEdge {
    pub node: Issue,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub reactions: ReactionConnection,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ReactionConnection {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub edges: Vec<ReactionEdge>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ReactionEdge {
    pub node: Reaction,
}

/// Issue edges of a page, dropping `null` edges and edges whose node is
/// `null`.
pub(super) fn resolved_edges<'de, D>(deserializer: D) -> Result<Vec<IssueEdge>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct NullableEdge {
        node: Option<Issue>,
    }

    let edges = Option::<Vec<Option<NullableEdge>>>::deserialize(deserializer)?;
    Ok(edges
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .filter_map(|edge| edge.node)
        .map(|node| IssueEdge { node })
        .collect())
}

impl Issue {
    /// Iterate the reactions attached to this issue, oldest first.
    pub fn reactions(&self) -> impl Iterator<Item = &Reaction> {
        self.reactions.edges.iter().map(|edge| &edge.node)
    }
}
