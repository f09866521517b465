use super::{Payload, Reply};
use crate::{fs::ExecutionContext, path::PathValue};
use serde::{Deserialize, Serialize};

/// Creates the command's path and any missing parents
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
pub struct MkDirsArgs;

impl Payload for MkDirsArgs {
    const TYPE_TAG: u16 = 8;

    type Output = ();

    fn execute<C: ExecutionContext + ?Sized>(
        &self,
        path: &PathValue,
        ctx: &C,
    ) -> Result<Self::Output, C::Error> {
        ctx.mkdirs(path)
    }

    fn into_reply(_: Self::Output) -> Reply {
        Reply::Done
    }
}
