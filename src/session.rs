//! Maps user intents onto one catalog operation and one reconciliation each.

use tracing::{debug, info, warn};

use crate::client::{GitHubClient, GraphQLResponse};
use crate::error::{GhError, Result};
use crate::operations::{self, Operation, RepoPath};
use crate::responses::{AddReactionData, AddStarData, IssuesPageData, RemoveStarData};
use crate::state::{self, ViewState};
use crate::types::ReactionContent;

/// An issued request for a page of issues.
///
/// Only the most recently issued request may be applied; anything older is
/// discarded by [`Session::apply_page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    generation: u64,
    path: RepoPath,
    cursor: Option<String>,
}

impl PageRequest {
    pub fn operation(&self) -> Operation {
        operations::fetch_issues_page(&self.path, self.cursor.as_deref())
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }
}

pub struct Session {
    client: GitHubClient,
    view: Option<ViewState>,
    generation: u64,
}

impl Session {
    pub fn new(client: GitHubClient) -> Self {
        Self {
            client,
            view: None,
            generation: 0,
        }
    }

    pub fn view(&self) -> Option<&ViewState> {
        self.view.as_ref()
    }

    /// Start a fresh fetch of `path`, dropping any accumulated pages once it
    /// is applied.
    pub fn begin_search(&mut self, path: &str) -> Result<PageRequest> {
        let path: RepoPath = path.parse()?;
        Ok(self.issue_page_request(path, None))
    }

    /// Start fetching the page after the last one in view.
    pub fn begin_load_more(&mut self) -> Result<PageRequest> {
        let view = self.view.as_ref().ok_or(GhError::NoMorePages)?;
        let cursor = view.next_cursor().ok_or(GhError::NoMorePages)?.to_string();
        let path = view.path.clone();
        Ok(self.issue_page_request(path, Some(cursor)))
    }

    /// Fold a page response into the view. Returns `false` when the request
    /// has been superseded and the response was dropped.
    pub fn apply_page(
        &mut self,
        request: PageRequest,
        response: GraphQLResponse<IssuesPageData>,
    ) -> Result<bool> {
        if request.generation != self.generation {
            warn!(
                path = %request.path,
                request = request.generation,
                current = self.generation,
                "Discarding stale page of issues"
            );
            return Ok(false);
        }

        let next = state::reconcile_issues_page(
            self.view.clone(),
            &request.path,
            response,
            request.cursor.as_deref(),
        )?;
        self.view = Some(next);
        Ok(true)
    }

    pub async fn search(&mut self, path: &str) -> Result<&ViewState> {
        let request = self.begin_search(path)?;
        info!(path = %request.path, "Searching issues");
        self.fetch_page(request).await
    }

    pub async fn load_more(&mut self) -> Result<&ViewState> {
        let request = self.begin_load_more()?;
        info!(path = %request.path, cursor = request.cursor(), "Loading more issues");
        self.fetch_page(request).await
    }

    /// Star the repository when `currently_starred` is false, unstar it
    /// otherwise.
    pub async fn toggle_star(&mut self, repo_id: &str, currently_starred: bool) -> Result<&ViewState> {
        self.ensure_repository(repo_id)?;

        let next = if currently_starred {
            info!(repo = repo_id, "Removing star");
            let response: GraphQLResponse<RemoveStarData> =
                self.client.execute(&operations::remove_star(repo_id)).await?;
            state::reconcile_remove_star(self.current()?, response)?
        } else {
            info!(repo = repo_id, "Adding star");
            let response: GraphQLResponse<AddStarData> =
                self.client.execute(&operations::add_star(repo_id)).await?;
            state::reconcile_add_star(self.current()?, response)?
        };

        Ok(&*self.view.insert(next))
    }

    pub async fn react(&mut self, issue_id: &str, content: ReactionContent) -> Result<&ViewState> {
        let in_view = self
            .view
            .as_ref()
            .is_some_and(|v| v.issues().iter().any(|edge| edge.node.id == issue_id));
        if !in_view {
            return Err(GhError::IssueNotFound(issue_id.to_string()));
        }

        info!(issue = issue_id, %content, "Adding reaction");
        let response: GraphQLResponse<AddReactionData> = self
            .client
            .execute(&operations::add_reaction(issue_id, content))
            .await?;
        let next = state::reconcile_add_reaction(self.current()?, issue_id, response)?;

        Ok(&*self.view.insert(next))
    }

    async fn fetch_page(&mut self, request: PageRequest) -> Result<&ViewState> {
        let response: GraphQLResponse<IssuesPageData> =
            self.client.execute(&request.operation()).await?;
        self.apply_page(request, response)?;
        self.view.as_ref().ok_or(GhError::NoRepository)
    }

    fn issue_page_request(&mut self, path: RepoPath, cursor: Option<String>) -> PageRequest {
        self.generation += 1;
        debug!(generation = self.generation, path = %path, "Issuing page request");
        PageRequest {
            generation: self.generation,
            path,
            cursor,
        }
    }

    fn ensure_repository(&self, repo_id: &str) -> Result<()> {
        let repo = self
            .view
            .as_ref()
            .and_then(ViewState::repository)
            .ok_or(GhError::NoRepository)?;

        if repo.id != repo_id {
            return Err(GhError::RepositoryMismatch {
                expected: repo.id.clone(),
                actual: repo_id.to_string(),
            });
        }
        Ok(())
    }

    fn current(&self) -> Result<ViewState> {
        self.view.clone().ok_or(GhError::NoRepository)
    }
}
