pub mod browse;
pub mod init;
pub mod issues;
pub mod reactions;
pub mod stars;

use crate::error::{GhError, Result};
use crate::state::ViewState;
use crate::types::Repository;

/// Turn errors recorded in the view into a command failure.
pub(crate) fn fail_on_errors(view: &ViewState) -> Result<()> {
    if view.has_errors() {
        return Err(GhError::GraphQL {
            messages: view.errors.iter().map(|e| e.message.clone()).collect(),
        });
    }
    Ok(())
}

pub(crate) fn require_repository(view: &ViewState) -> Result<&Repository> {
    fail_on_errors(view)?;
    view.repository().ok_or(GhError::NoRepository)
}
