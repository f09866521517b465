mod namespace;

pub use namespace::Namespaces;

use crate::{
    command::{Command, Registry, Reply},
    error::CommandError,
    fs::ExecutionContext,
};
use derive_builder::Builder;
use log::{debug, trace};
use yonder_wire::WireConfig;

/// Receiving end of commands: decodes them, resolves their namespace to an
/// execution context and executes them there
#[derive(Builder)]
#[builder(pattern = "owned")]
pub struct Dispatcher<C: ExecutionContext> {
    /// Variants that can be decoded
    #[builder(default)]
    registry: Registry,

    /// Contexts commands are executed against
    #[builder(default)]
    namespaces: Namespaces<C>,

    /// Limits applied while decoding
    #[builder(default)]
    config: WireConfig,
}

impl<C: ExecutionContext> Dispatcher<C> {
    /// Dispatcher for every built-in variant with default limits
    pub fn new(namespaces: Namespaces<C>) -> Self {
        Self {
            registry: Registry::default(),
            namespaces,
            config: WireConfig::default(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn namespaces(&self) -> &Namespaces<C> {
        &self.namespaces
    }

    pub fn namespaces_mut(&mut self) -> &mut Namespaces<C> {
        &mut self.namespaces
    }

    pub fn config(&self) -> &WireConfig {
        &self.config
    }

    /// Executes an already decoded command in the context of its namespace
    pub fn dispatch(
        &self,
        command: &Command,
    ) -> Result<Reply, CommandError<C::Error>> {
        debug!(
            "Dispatching {} on {} in namespace {:?}",
            command.name(),
            command.path(),
            command.namespace()
        );

        let ctx = self.namespaces.resolve(command.namespace()).ok_or_else(
            || CommandError::UnknownNamespace(command.namespace().map(String::from)),
        )?;

        command.execute_on(ctx).map_err(CommandError::Execution)
    }

    /// Decodes a raw-encoded command and dispatches it
    pub fn dispatch_raw(
        &self,
        bytes: &[u8],
    ) -> Result<Reply, CommandError<C::Error>> {
        let command =
            Command::from_raw_bytes_with_config(&self.registry, bytes, &self.config)?;
        trace!("Decoded raw command: {:?}", command);
        self.dispatch(&command)
    }

    /// Decodes a field-encoded command and dispatches it
    pub fn dispatch_fields(
        &self,
        bytes: &[u8],
    ) -> Result<Reply, CommandError<C::Error>> {
        let command = Command::from_field_bytes_with_config(
            &self.registry,
            bytes,
            &self.config,
        )?;
        trace!("Decoded field command: {:?}", command);
        self.dispatch(&command)
    }
}
