use crate::path::PathValue;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Result of executing a command
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Reply {
    /// The operation completed and has nothing to report
    Done,

    /// Direct children of the command's path, in no particular order
    Paths(HashSet<PathValue>),

    /// Whether the command's path exists
    Exists(bool),

    /// Whether anything was removed
    Deleted(bool),
}

impl Reply {
    pub fn into_paths(self) -> Option<HashSet<PathValue>> {
        match self {
            Self::Paths(x) => Some(x),
            _ => None,
        }
    }
}
