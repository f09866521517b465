use super::{Payload, Reply};
use crate::{fs::ExecutionContext, path::PathValue};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Lists the direct children of the command's path
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
pub struct ListPathsArgs;

impl Payload for ListPathsArgs {
    const TYPE_TAG: u16 = 7;

    type Output = HashSet<PathValue>;

    fn execute<C: ExecutionContext + ?Sized>(
        &self,
        path: &PathValue,
        ctx: &C,
    ) -> Result<Self::Output, C::Error> {
        ctx.list_children(path)
    }

    fn into_reply(output: Self::Output) -> Reply {
        Reply::Paths(output)
    }
}
