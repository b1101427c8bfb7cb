use crate::cli::RepoArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::session::Session;

use super::{fail_on_errors, require_repository};

/// Bring the repository's star state to `starred`.
pub async fn set_starred(
    session: &mut Session,
    config: &Config,
    args: RepoArgs,
    starred: bool,
) -> Result<()> {
    let path = config.resolve_path(args.path.as_deref());
    let view = session.search(&path).await?;
    let repo = require_repository(view)?;

    if repo.viewer_has_starred == starred {
        let state = if starred { "already" } else { "not" };
        output::print_message(&format!("{path} is {state} starred"));
        return Ok(());
    }

    let repo_id = repo.id.clone();
    let currently_starred = repo.viewer_has_starred;
    let view = session.toggle_star(&repo_id, currently_starred).await?;
    fail_on_errors(view)?;
    let repo = require_repository(view)?;

    let verb = if repo.viewer_has_starred { "Starred" } else { "Unstarred" };
    output::print_message(&format!(
        "{verb} {path} ({} stars)",
        repo.stargazers.total_count
    ));
    Ok(())
}
