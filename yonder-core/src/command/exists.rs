use super::{Payload, Reply};
use crate::{fs::ExecutionContext, path::PathValue};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
pub struct ExistsArgs;

impl Payload for ExistsArgs {
    const TYPE_TAG: u16 = 3;

    type Output = bool;

    fn execute<C: ExecutionContext + ?Sized>(
        &self,
        path: &PathValue,
        ctx: &C,
    ) -> Result<Self::Output, C::Error> {
        ctx.exists(path)
    }

    fn into_reply(output: Self::Output) -> Reply {
        Reply::Exists(output)
    }
}
