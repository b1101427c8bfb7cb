//! `data` payloads returned by the operations in `crate::operations`.

use serde::Deserialize;

use crate::types::{Organization, Reaction};

#[derive(Deserialize, Debug)]
pub struct IssuesPageData {
    pub organization: Option<Organization>,
}

// Mutation payloads are nullable: a rejected mutation comes back as
// `{"addStar": null}` next to an `errors` entry.

#[derive(Deserialize, Debug)]
pub struct AddStarData {
    #[serde(rename = "addStar")]
    pub add_star: Option<StarPayload>,
}

#[derive(Deserialize, Debug)]
pub struct RemoveStarData {
    #[serde(rename = "removeStar")]
    pub remove_star: Option<StarPayload>,
}

#[derive(Deserialize, Debug)]
pub struct StarPayload {
    pub starrable: Starrable,
}

#[derive(Deserialize, Debug)]
pub struct Starrable {
    #[serde(rename = "viewerHasStarred")]
    pub viewer_has_starred: bool,
}

#[derive(Deserialize, Debug)]
pub struct AddReactionData {
    #[serde(rename = "addReaction")]
    pub add_reaction: Option<ReactionPayload>,
}

#[derive(Deserialize, Debug)]
pub struct ReactionPayload {
    pub reaction: Reaction,
}
