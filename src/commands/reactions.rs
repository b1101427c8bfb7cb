use crate::cli::ReactArgs;
use crate::config::Config;
use crate::error::{GhError, Result};
use crate::output;
use crate::session::Session;

use super::fail_on_errors;

pub async fn react(session: &mut Session, config: &Config, args: ReactArgs) -> Result<()> {
    let path = config.resolve_path(args.path.as_deref());
    session.search(&path).await?;

    // The issue may sit on a later page than the first.
    loop {
        let view = session.view().ok_or(GhError::NoRepository)?;
        fail_on_errors(view)?;
        if view.issues().iter().any(|e| e.node.id == args.issue_id) {
            break;
        }
        if !view.has_next_page() {
            return Err(GhError::IssueNotFound(args.issue_id));
        }
        session.load_more().await?;
    }

    let view = session.react(&args.issue_id, args.content).await?;
    fail_on_errors(view)?;

    let title = view
        .issues()
        .iter()
        .find(|e| e.node.id == args.issue_id)
        .map(|e| e.node.title.as_str())
        .unwrap_or(&args.issue_id);
    output::print_message(&format!(
        "Reacted {} to \"{}\"",
        args.content.emoji(),
        output::truncate(title, 60)
    ));
    Ok(())
}
