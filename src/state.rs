//! Client-side view of one organization/repository/issue list, and the
//! reconcilers that fold operation results into it.
//!
//! Every reconciler takes the prior view by value and returns the next one.
//! Nothing outside the returned value is touched, so a caller that keeps a
//! clone of the prior view still sees it unchanged.

use serde::Serialize;
use tracing::{debug, warn};

use crate::client::{GraphQLError, GraphQLResponse};
use crate::error::{GhError, Result};
use crate::operations::RepoPath;
use crate::responses::{AddReactionData, AddStarData, IssuesPageData, RemoveStarData};
use crate::types::{IssueEdge, Organization, ReactionEdge, Repository};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub path: RepoPath,
    pub organization: Option<Organization>,
    /// Errors reported by the most recent operation. Empty after a clean one.
    pub errors: Vec<GraphQLError>,
}

impl ViewState {
    pub fn repository(&self) -> Option<&Repository> {
        self.organization.as_ref()?.repository.as_ref()
    }

    pub fn issues(&self) -> &[IssueEdge] {
        self.repository()
            .map(|repo| repo.issues.edges.as_slice())
            .unwrap_or_default()
    }

    pub fn has_next_page(&self) -> bool {
        self.repository()
            .is_some_and(|repo| repo.issues.page_info.has_next_page)
    }

    /// Cursor to continue from, only when another page exists.
    pub fn next_cursor(&self) -> Option<&str> {
        let page_info = &self.repository()?.issues.page_info;
        if page_info.has_next_page {
            page_info.end_cursor.as_deref()
        } else {
            None
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn repository_mut(&mut self) -> Option<&mut Repository> {
        self.organization.as_mut()?.repository.as_mut()
    }
}

/// Fold one page of issues into the view.
///
/// Without a cursor the result replaces the view wholesale. With a cursor the
/// new edges are appended after the prior ones and every other field is taken
/// from the result.
pub fn reconcile_issues_page(
    prior: Option<ViewState>,
    path: &RepoPath,
    result: GraphQLResponse<IssuesPageData>,
    cursor: Option<&str>,
) -> Result<ViewState> {
    let GraphQLResponse { data, errors } = result;
    let fetched = data.and_then(|d| d.organization);

    let Some(cursor) = cursor else {
        debug!(
            path = %path,
            issues = fetched
                .as_ref()
                .and_then(|o| o.repository.as_ref())
                .map_or(0, |r| r.issues.edges.len()),
            errors = errors.len(),
            "Replacing view with first page"
        );
        return Ok(ViewState {
            path: path.clone(),
            organization: fetched,
            errors,
        });
    };

    let prior = prior.ok_or(GhError::NoRepository)?;
    if prior.repository().is_none() {
        return Err(GhError::NoRepository);
    }

    let mut organization = match fetched {
        Some(org) if org.repository.is_some() => org,
        _ => {
            warn!(
                path = %prior.path,
                cursor,
                errors = errors.len(),
                "Page came back without a repository, keeping prior issues"
            );
            return Ok(ViewState { errors, ..prior });
        }
    };

    let mut edges = prior
        .organization
        .and_then(|o| o.repository)
        .map(|r| r.issues.edges)
        .unwrap_or_default();

    if let Some(repo) = organization.repository.as_mut() {
        let fetched_count = repo.issues.edges.len();
        edges.append(&mut repo.issues.edges);
        debug!(
            cursor,
            fetched = fetched_count,
            total = edges.len(),
            "Appended page of issues"
        );
        repo.issues.edges = edges;
    }

    Ok(ViewState {
        path: prior.path,
        organization: Some(organization),
        errors,
    })
}

pub fn reconcile_add_star(prior: ViewState, result: GraphQLResponse<AddStarData>) -> Result<ViewState> {
    let GraphQLResponse { data, errors } = result;
    let payload = data.and_then(|d| d.add_star);
    update_repository(prior, errors, payload, |repo, payload| {
        repo.viewer_has_starred = payload.starrable.viewer_has_starred;
        repo.stargazers.total_count = repo.stargazers.total_count.saturating_add(1);
    })
}

/// Mirror of [`reconcile_add_star`]. The star count stops at zero.
pub fn reconcile_remove_star(
    prior: ViewState,
    result: GraphQLResponse<RemoveStarData>,
) -> Result<ViewState> {
    let GraphQLResponse { data, errors } = result;
    let payload = data.and_then(|d| d.remove_star);
    update_repository(prior, errors, payload, |repo, payload| {
        repo.viewer_has_starred = payload.starrable.viewer_has_starred;
        repo.stargazers.total_count = match repo.stargazers.total_count.checked_sub(1) {
            Some(count) => count,
            None => {
                warn!(repo = %repo.id, "Star count already zero, not decrementing");
                0
            }
        };
    })
}

/// Append the created reaction to the issue with `issue_id`.
pub fn reconcile_add_reaction(
    prior: ViewState,
    issue_id: &str,
    result: GraphQLResponse<AddReactionData>,
) -> Result<ViewState> {
    let GraphQLResponse { data, errors } = result;

    let position = prior
        .issues()
        .iter()
        .position(|edge| edge.node.id == issue_id)
        .ok_or_else(|| GhError::IssueNotFound(issue_id.to_string()))?;

    let payload = data.and_then(|d| d.add_reaction);
    update_repository(prior, errors, payload, |repo, payload| {
        let issue = &mut repo.issues.edges[position].node;
        issue.reactions.edges.push(ReactionEdge {
            node: payload.reaction,
        });
        debug!(
            issue = %issue.id,
            reactions = issue.reactions.edges.len(),
            "Appended reaction"
        );
    })
}

/// Apply `update` when the mutation returned a payload. A null payload means
/// the server rejected it, so only `errors` changes.
fn update_repository<P>(
    mut prior: ViewState,
    errors: Vec<GraphQLError>,
    payload: Option<P>,
    update: impl FnOnce(&mut Repository, P),
) -> Result<ViewState> {
    let repo = prior.repository_mut().ok_or(GhError::NoRepository)?;
    match payload {
        Some(payload) => update(repo, payload),
        None => debug!(errors = errors.len(), "Mutation returned no payload"),
    }
    prior.errors = errors;
    Ok(prior)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Reaction, ReactionContent};
    use serde_json::json;

    fn path() -> RepoPath {
        "octocat/Hello-World".parse().unwrap()
    }

    fn issue(id: &str) -> serde_json::Value {
        json!({
            "node": {
                "id": id,
                "title": format!("Issue {id}"),
                "url": format!("https://github.com/octocat/Hello-World/issues/{id}"),
                "reactions": { "edges": [] }
            }
        })
    }

    fn organization(
        ids: &[&str],
        total: u32,
        end_cursor: Option<&str>,
        has_next_page: bool,
    ) -> Organization {
        let edges: Vec<_> = ids.iter().map(|id| issue(id)).collect();
        serde_json::from_value(json!({
            "name": "octocat",
            "url": "https://github.com/octocat",
            "description": null,
            "email": null,
            "repository": {
                "id": "R_1",
                "name": "Hello-World",
                "url": "https://github.com/octocat/Hello-World",
                "description": "My first repository",
                "viewerHasStarred": false,
                "stargazers": { "totalCount": 10 },
                "issues": {
                    "totalCount": total,
                    "edges": edges,
                    "pageInfo": { "endCursor": end_cursor, "hasNextPage": has_next_page }
                }
            }
        }))
        .unwrap()
    }

    fn page(org: Organization) -> GraphQLResponse<IssuesPageData> {
        GraphQLResponse {
            data: Some(IssuesPageData {
                organization: Some(org),
            }),
            errors: Vec::new(),
        }
    }

    fn error(message: &str) -> GraphQLError {
        GraphQLError {
            message: message.to_string(),
        }
    }

    fn view(org: Organization) -> ViewState {
        ViewState {
            path: path(),
            organization: Some(org),
            errors: Vec::new(),
        }
    }

    fn ids(state: &ViewState) -> Vec<&str> {
        state.issues().iter().map(|e| e.node.id.as_str()).collect()
    }

    fn starred(viewer_has_starred: bool) -> serde_json::Value {
        json!({ "starrable": { "viewerHasStarred": viewer_has_starred } })
    }

    fn add_star_result(viewer_has_starred: bool) -> GraphQLResponse<AddStarData> {
        GraphQLResponse {
            data: Some(serde_json::from_value(json!({ "addStar": starred(viewer_has_starred) })).unwrap()),
            errors: Vec::new(),
        }
    }

    fn remove_star_result(viewer_has_starred: bool) -> GraphQLResponse<RemoveStarData> {
        GraphQLResponse {
            data: Some(
                serde_json::from_value(json!({ "removeStar": starred(viewer_has_starred) })).unwrap(),
            ),
            errors: Vec::new(),
        }
    }

    fn reaction_result(id: &str, content: ReactionContent) -> GraphQLResponse<AddReactionData> {
        GraphQLResponse {
            data: Some(
                serde_json::from_value(json!({
                    "addReaction": { "reaction": { "id": id, "content": content } }
                }))
                .unwrap(),
            ),
            errors: Vec::new(),
        }
    }

    #[test]
    fn fresh_search_replaces_prior_edges() {
        let prior = view(organization(&["a", "b", "c"], 3, Some("x"), false));
        let next = reconcile_issues_page(
            Some(prior),
            &path(),
            page(organization(&["d"], 1, Some("y"), true)),
            None,
        )
        .unwrap();

        assert_eq!(ids(&next), vec!["d"]);
        assert_eq!(next.next_cursor(), Some("y"));
    }

    #[test]
    fn fresh_search_without_prior_creates_view() {
        let next =
            reconcile_issues_page(None, &path(), page(organization(&["a"], 1, None, false)), None)
                .unwrap();

        assert_eq!(next.path.to_string(), "octocat/Hello-World");
        assert_eq!(ids(&next), vec!["a"]);
        assert!(!next.has_next_page());
    }

    #[test]
    fn next_page_appends_in_order() {
        let prior = view(organization(&["a", "b"], 4, Some("c1"), true));
        let mut fresh = organization(&["c", "d"], 5, Some("c2"), false);
        fresh.description = Some("updated".to_string());

        let next = reconcile_issues_page(Some(prior), &path(), page(fresh), Some("c1")).unwrap();

        assert_eq!(ids(&next), vec!["a", "b", "c", "d"]);
        let repo = next.repository().unwrap();
        assert_eq!(repo.issues.total_count, 5);
        assert_eq!(repo.issues.page_info.end_cursor.as_deref(), Some("c2"));
        assert!(!next.has_next_page());
        assert_eq!(
            next.organization.as_ref().unwrap().description.as_deref(),
            Some("updated")
        );
    }

    #[test]
    fn next_page_does_not_deduplicate() {
        let prior = view(organization(&["a"], 2, Some("c1"), true));
        let next = reconcile_issues_page(
            Some(prior),
            &path(),
            page(organization(&["a"], 2, None, false)),
            Some("c1"),
        )
        .unwrap();

        assert_eq!(ids(&next), vec!["a", "a"]);
    }

    #[test]
    fn next_page_requires_prior_view() {
        let err = reconcile_issues_page(
            None,
            &path(),
            page(organization(&["a"], 1, None, false)),
            Some("c1"),
        )
        .unwrap_err();

        assert!(matches!(err, GhError::NoRepository));
    }

    #[test]
    fn partial_response_stores_errors_with_data() {
        let mut result = page(organization(&["a"], 1, None, false));
        result.errors = vec![error("rate limited")];

        let next = reconcile_issues_page(None, &path(), result, None).unwrap();

        assert_eq!(ids(&next), vec!["a"]);
        assert_eq!(next.errors, vec![error("rate limited")]);
    }

    #[test]
    fn page_with_nulled_fields_merges_and_stores_errors() {
        let prior = view(organization(&["a"], 3, Some("c1"), true));
        let result: GraphQLResponse<IssuesPageData> = serde_json::from_value(json!({
            "data": { "organization": {
                "name": "octocat", "url": null, "description": null, "email": null,
                "repository": {
                    "id": "R_1", "name": "Hello-World", "url": "u", "description": null,
                    "viewerHasStarred": false,
                    "stargazers": { "totalCount": 10 },
                    "issues": {
                        "totalCount": 3,
                        "edges": [
                            { "node": { "id": "b", "title": "t", "url": "u", "reactions": null } },
                            { "node": null },
                            null,
                            { "node": { "id": "c", "title": "t", "url": "u",
                                        "reactions": { "edges": null } } }
                        ],
                        "pageInfo": { "endCursor": "c2", "hasNextPage": false }
                    }
                }
            } },
            "errors": [{ "message": "partial" }]
        }))
        .unwrap();

        let next = reconcile_issues_page(Some(prior), &path(), result, Some("c1")).unwrap();

        assert_eq!(ids(&next), vec!["a", "b", "c"]);
        assert_eq!(next.issues()[1].node.reactions().count(), 0);
        assert_eq!(next.errors, vec![error("partial")]);
    }

    #[test]
    fn failed_next_page_keeps_prior_issues() {
        let prior = view(organization(&["a"], 2, Some("c1"), true));
        let result = GraphQLResponse {
            data: Some(IssuesPageData { organization: None }),
            errors: vec![error("Something broke")],
        };

        let next = reconcile_issues_page(Some(prior), &path(), result, Some("c1")).unwrap();

        assert_eq!(ids(&next), vec!["a"]);
        assert!(next.has_next_page());
        assert_eq!(next.errors, vec![error("Something broke")]);
    }

    #[test]
    fn successful_next_page_clears_errors() {
        let mut prior = view(organization(&["a"], 2, Some("c1"), true));
        prior.errors = vec![error("earlier failure")];

        let next = reconcile_issues_page(
            Some(prior),
            &path(),
            page(organization(&["b"], 2, None, false)),
            Some("c1"),
        )
        .unwrap();

        assert!(!next.has_errors());
    }

    #[test]
    fn add_star_sets_flag_and_increments() {
        let prior = view(organization(&[], 0, None, false));
        let next = reconcile_add_star(prior, add_star_result(true)).unwrap();

        let repo = next.repository().unwrap();
        assert!(repo.viewer_has_starred);
        assert_eq!(repo.stargazers.total_count, 11);
    }

    #[test]
    fn star_then_unstar_restores_count() {
        let prior = view(organization(&[], 0, None, false));
        let starred = reconcile_add_star(prior.clone(), add_star_result(true)).unwrap();
        let unstarred = reconcile_remove_star(starred, remove_star_result(false)).unwrap();

        assert_eq!(
            unstarred.repository().unwrap().stargazers,
            prior.repository().unwrap().stargazers
        );
        assert!(!unstarred.repository().unwrap().viewer_has_starred);
    }

    #[test]
    fn unstar_then_star_restores_count() {
        let mut org = organization(&[], 0, None, false);
        org.repository.as_mut().unwrap().viewer_has_starred = true;
        let prior = view(org);

        let unstarred = reconcile_remove_star(prior.clone(), remove_star_result(false)).unwrap();
        assert_eq!(unstarred.repository().unwrap().stargazers.total_count, 9);
        let restarred = reconcile_add_star(unstarred, add_star_result(true)).unwrap();

        assert_eq!(restarred.repository(), prior.repository());
    }

    #[test]
    fn unstar_at_zero_is_not_undone_by_star() {
        let mut org = organization(&[], 0, None, false);
        let repo = org.repository.as_mut().unwrap();
        repo.viewer_has_starred = true;
        repo.stargazers.total_count = 0;

        let unstarred = reconcile_remove_star(view(org), remove_star_result(false)).unwrap();
        let restarred = reconcile_add_star(unstarred, add_star_result(true)).unwrap();

        assert_eq!(restarred.repository().unwrap().stargazers.total_count, 1);
    }

    #[test]
    fn remove_star_stops_at_zero() {
        let mut org = organization(&[], 0, None, false);
        org.repository.as_mut().unwrap().stargazers.total_count = 0;

        let next = reconcile_remove_star(view(org), remove_star_result(false)).unwrap();

        assert_eq!(next.repository().unwrap().stargazers.total_count, 0);
    }

    #[test]
    fn star_error_leaves_counter_untouched() {
        let prior = view(organization(&[], 0, None, false));
        let result = GraphQLResponse {
            data: None,
            errors: vec![error("forbidden")],
        };

        let next = reconcile_add_star(prior, result).unwrap();

        assert_eq!(next.repository().unwrap().stargazers.total_count, 10);
        assert_eq!(next.errors, vec![error("forbidden")]);
    }

    #[test]
    fn rejected_star_keeps_state_and_stores_errors() {
        let prior = view(organization(&[], 0, None, false));
        let result: GraphQLResponse<AddStarData> = serde_json::from_value(json!({
            "data": { "addStar": null },
            "errors": [{ "message": "Resource not accessible by integration" }]
        }))
        .unwrap();

        let next = reconcile_add_star(prior.clone(), result).unwrap();

        assert_eq!(next.repository(), prior.repository());
        assert_eq!(next.errors, vec![error("Resource not accessible by integration")]);
    }

    #[test]
    fn rejected_unstar_keeps_state_and_stores_errors() {
        let mut org = organization(&[], 0, None, false);
        org.repository.as_mut().unwrap().viewer_has_starred = true;
        let prior = view(org);
        let result: GraphQLResponse<RemoveStarData> = serde_json::from_value(json!({
            "data": { "removeStar": null },
            "errors": [{ "message": "forbidden" }]
        }))
        .unwrap();

        let next = reconcile_remove_star(prior.clone(), result).unwrap();

        assert_eq!(next.repository(), prior.repository());
        assert_eq!(next.errors, vec![error("forbidden")]);
    }

    #[test]
    fn star_requires_repository() {
        let prior = ViewState {
            path: path(),
            organization: None,
            errors: Vec::new(),
        };
        let err = reconcile_add_star(prior, add_star_result(true)).unwrap_err();
        assert!(matches!(err, GhError::NoRepository));
    }

    #[test]
    fn reaction_appends_after_existing() {
        let mut org = organization(&["a", "b"], 2, None, false);
        org.repository.as_mut().unwrap().issues.edges[1]
            .node
            .reactions
            .edges
            .push(ReactionEdge {
                node: Reaction {
                    id: "r1".to_string(),
                    content: ReactionContent::Heart,
                },
            });

        let prior = view(org);
        let next =
            reconcile_add_reaction(prior.clone(), "b", reaction_result("r2", ReactionContent::Hooray))
                .unwrap();

        let reactions: Vec<_> = next.issues()[1].node.reactions().map(|r| r.id.as_str()).collect();
        assert_eq!(reactions, vec!["r1", "r2"]);
        assert_eq!(next.issues()[0], prior.issues()[0]);
        assert_eq!(prior.issues()[1].node.reactions().count(), 1);
    }

    #[test]
    fn reaction_on_issue_without_reactions_field() {
        let org: Organization = serde_json::from_value(json!({
            "name": null, "url": null, "description": null, "email": null,
            "repository": {
                "id": "R_1", "name": "r", "url": "u", "description": null,
                "viewerHasStarred": false,
                "stargazers": { "totalCount": 0 },
                "issues": {
                    "totalCount": 1,
                    "edges": [{ "node": { "id": "a", "title": "t", "url": "u" } }],
                    "pageInfo": { "endCursor": null, "hasNextPage": false }
                }
            }
        }))
        .unwrap();

        let next =
            reconcile_add_reaction(view(org), "a", reaction_result("r1", ReactionContent::Eyes))
                .unwrap();

        let reaction = next.issues()[0].node.reactions().next().unwrap();
        assert_eq!(reaction.content, ReactionContent::Eyes);
    }

    #[test]
    fn rejected_reaction_keeps_reactions_and_stores_errors() {
        let prior = view(organization(&["a"], 1, None, false));
        let result: GraphQLResponse<AddReactionData> = serde_json::from_value(json!({
            "data": { "addReaction": null },
            "errors": [{ "message": "Could not resolve to a node" }]
        }))
        .unwrap();

        let next = reconcile_add_reaction(prior.clone(), "a", result).unwrap();

        assert_eq!(next.issues(), prior.issues());
        assert_eq!(next.errors, vec![error("Could not resolve to a node")]);
    }

    #[test]
    fn reaction_on_unknown_issue_fails() {
        let prior = view(organization(&["a"], 1, None, false));
        let err =
            reconcile_add_reaction(prior, "zzz", reaction_result("r1", ReactionContent::Hooray))
                .unwrap_err();
        assert!(matches!(err, GhError::IssueNotFound(id) if id == "zzz"));
    }
}
