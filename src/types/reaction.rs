use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Reaction kinds accepted by the `addReaction` mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactionContent {
    /// :+1:
    ThumbsUp,
    /// :-1:
    ThumbsDown,
    /// :laugh:
    Laugh,
    /// :hooray:
    #[default]
    Hooray,
    /// :confused:
    Confused,
    /// :heart:
    Heart,
    /// :rocket:
    Rocket,
    /// :eyes:
    Eyes,
    /// Any kind this client does not know yet. Never sent.
    #[value(skip)]
    #[serde(other)]
    Unknown,
}

impl ReactionContent {
    /// Name as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ThumbsUp => "THUMBS_UP",
            Self::ThumbsDown => "THUMBS_DOWN",
            Self::Laugh => "LAUGH",
            Self::Hooray => "HOORAY",
            Self::Confused => "CONFUSED",
            Self::Heart => "HEART",
            Self::Rocket => "ROCKET",
            Self::Eyes => "EYES",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::ThumbsUp => "👍",
            Self::ThumbsDown => "👎",
            Self::Laugh => "😄",
            Self::Hooray => "🎉",
            Self::Confused => "😕",
            Self::Heart => "❤️",
            Self::Rocket => "🚀",
            Self::Eyes => "👀",
            Self::Unknown => "?",
        }
    }
}

impl fmt::Display for ReactionContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: String,
    pub content: ReactionContent,
}
