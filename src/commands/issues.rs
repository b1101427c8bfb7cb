use tracing::debug;

use crate::cli::SearchArgs;
use crate::config::Config;
use crate::error::{GhError, Result};
use crate::output;
use crate::session::Session;

pub async fn search(session: &mut Session, config: &Config, args: SearchArgs) -> Result<()> {
    let path = config.resolve_path(args.path.as_deref());
    session.search(&path).await?;

    let mut fetched = 1;
    while args.all || fetched < args.pages {
        let view = session.view().ok_or(GhError::NoRepository)?;
        if view.has_errors() || !view.has_next_page() {
            break;
        }
        session.load_more().await?;
        fetched += 1;
    }
    debug!(pages = fetched, "Finished fetching issues");

    let view = session.view().ok_or(GhError::NoRepository)?;
    output::print_view(view);
    Ok(())
}
