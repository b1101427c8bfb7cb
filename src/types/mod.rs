use serde::{Deserialize, Deserializer};

mod issue;
mod organization;
mod reaction;
mod repository;

pub use issue::{Issue, IssueEdge, ReactionEdge};
pub use organization::Organization;
pub use reaction::{Reaction, ReactionContent};
pub use repository::Repository;

/// Treat an explicit `null` like a missing field. GitHub nulls nested
/// connections it could not resolve and reports why in `errors`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
