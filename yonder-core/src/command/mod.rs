mod delete;
mod envelope;
mod exists;
mod list_paths;
mod mkdirs;
mod payload;
mod registry;
mod rename;
mod reply;
mod set_times;

pub use delete::DeleteArgs;
pub use envelope::ENVELOPE_FIELD_COUNT;
pub use exists::ExistsArgs;
pub use list_paths::ListPathsArgs;
pub use mkdirs::MkDirsArgs;
pub use payload::Payload;
pub use registry::{Factory, Registry};
pub use rename::RenameArgs;
pub use reply::Reply;
pub use set_times::SetTimesArgs;

use crate::{
    error::{CorruptReason, DecodeError},
    fs::ExecutionContext,
    path::PathValue,
};
use log::trace;
use serde::{Deserialize, Serialize};
use strum_macros::IntoStaticStr;
use yonder_wire::{
    BufferedFieldWriter, FieldHeader, FieldReader, FieldWriter, RawReader,
    RawWriter, SliceFieldReader, WireConfig,
};

/// Declares the closed set of command variants, generating the enum over
/// their payloads along with the exhaustive dispatch into each payload
macro_rules! command_args {
    ($($variant:ident($args:ty)),+ $(,)?) => {
        #[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, IntoStaticStr)]
        #[serde(tag = "type", content = "payload", rename_all = "snake_case")]
        #[strum(serialize_all = "snake_case")]
        pub enum CommandArgs {
            $($variant($args)),+
        }

        impl CommandArgs {
            pub fn type_tag(&self) -> u16 {
                match self {
                    $(Self::$variant(_) => <$args as Payload>::TYPE_TAG),+
                }
            }

            pub fn extra_field_count(&self) -> u8 {
                match self {
                    $(Self::$variant(_) => <$args as Payload>::EXTRA_FIELD_COUNT),+
                }
            }

            /// Every built-in variant with the factory for its empty form
            pub fn builtins() -> Vec<(u16, Factory)> {
                vec![$((
                    <$args as Payload>::TYPE_TAG,
                    (|| Self::$variant(<$args>::default())) as Factory,
                )),+]
            }

            fn encode_raw(&self, writer: &mut RawWriter) {
                match self {
                    $(Self::$variant(x) => x.encode_raw(writer)),+
                }
            }

            fn decode_raw(&mut self, reader: &mut RawReader) -> Result<(), DecodeError> {
                match self {
                    $(Self::$variant(x) => *x = <$args>::decode_raw(reader)?),+
                }
                Ok(())
            }

            fn write_field<W: FieldWriter + ?Sized>(&self, writer: &mut W, id: u8) -> bool {
                match self {
                    $(Self::$variant(x) => x.write_field(writer, id)),+
                }
            }

            fn read_field<R: FieldReader + ?Sized>(
                &mut self,
                reader: &mut R,
                id: u8,
            ) -> Result<(), DecodeError> {
                match self {
                    $(Self::$variant(x) => x.read_field(reader, id)),+
                }
            }

            fn execute<C: ExecutionContext + ?Sized>(
                &self,
                path: &PathValue,
                ctx: &C,
            ) -> Result<Reply, C::Error> {
                match self {
                    $(Self::$variant(x) => x.execute(path, ctx).map(<$args as Payload>::into_reply)),+
                }
            }
        }

        $(
            impl From<$args> for CommandArgs {
                fn from(x: $args) -> Self {
                    Self::$variant(x)
                }
            }
        )+
    };
}

command_args! {
    Delete(DeleteArgs),
    Exists(ExistsArgs),
    ListPaths(ListPathsArgs),
    MkDirs(MkDirsArgs),
    Rename(RenameArgs),
    SetTimes(SetTimesArgs),
}

/// Where a resumable field write left off
///
/// Owned by whoever is sending the command, never by the command itself, so
/// that a single command can be sent by several independent writes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SendProgress {
    NotStarted,

    /// The header and every field before this id have been written
    Field(u8),

    Done,
}

impl SendProgress {
    pub fn is_done(&self) -> bool {
        *self == Self::Done
    }
}

impl Default for SendProgress {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// A file-system operation targeting a path within an optional namespace,
/// identified on the wire by the type tag of its arguments
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Command {
    namespace: Option<String>,
    path: PathValue,
    args: CommandArgs,
}

impl Command {
    pub fn new(
        namespace: Option<String>,
        path: PathValue,
        args: impl Into<CommandArgs>,
    ) -> Self {
        Self {
            namespace,
            path,
            args: args.into(),
        }
    }

    pub fn list_paths(namespace: Option<String>, path: PathValue) -> Self {
        Self::new(namespace, path, ListPathsArgs)
    }

    pub fn set_times(
        namespace: Option<String>,
        path: PathValue,
        access_time: i64,
        modification_time: i64,
    ) -> Self {
        Self::new(
            namespace,
            path,
            SetTimesArgs {
                access_time,
                modification_time,
            },
        )
    }

    pub fn exists(namespace: Option<String>, path: PathValue) -> Self {
        Self::new(namespace, path, ExistsArgs)
    }

    pub fn delete(
        namespace: Option<String>,
        path: PathValue,
        recursive: bool,
    ) -> Self {
        Self::new(namespace, path, DeleteArgs { recursive })
    }

    pub fn rename(
        namespace: Option<String>,
        path: PathValue,
        destination: PathValue,
    ) -> Self {
        Self::new(namespace, path, RenameArgs { destination })
    }

    pub fn mkdirs(namespace: Option<String>, path: PathValue) -> Self {
        Self::new(namespace, path, MkDirsArgs)
    }

    /// Empty command for the given arguments, waiting to be populated by a
    /// decoder
    fn empty(args: CommandArgs) -> Self {
        Self {
            namespace: None,
            path: PathValue::root(),
            args,
        }
    }

    pub fn type_tag(&self) -> u16 {
        self.args.type_tag()
    }

    /// Name of the variant, for logging
    pub fn name(&self) -> &'static str {
        (&self.args).into()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn path(&self) -> &PathValue {
        &self.path
    }

    pub fn args(&self) -> &CommandArgs {
        &self.args
    }

    /// Number of fields the variant adds to those of the envelope
    pub fn declared_field_count(&self) -> u8 {
        self.args.extra_field_count()
    }

    /// Total number of fields written by the field codec
    pub fn field_count(&self) -> u8 {
        ENVELOPE_FIELD_COUNT + self.declared_field_count()
    }

    /// Executes the command against `ctx`; failures of the context are
    /// returned untouched
    pub fn execute_on<C: ExecutionContext + ?Sized>(
        &self,
        ctx: &C,
    ) -> Result<Reply, C::Error> {
        self.args.execute(&self.path, ctx)
    }

    // ------------------------------------------------------------------------
    // Raw codec

    pub fn encode_raw(&self, writer: &mut RawWriter) {
        writer.write_u16(self.type_tag());
        envelope::encode_raw(self.namespace(), &self.path, writer);
        self.args.encode_raw(writer);
    }

    /// Reads one command from `reader`, leaving any bytes after it unread
    pub fn decode_raw(
        registry: &Registry,
        reader: &mut RawReader,
    ) -> Result<Self, DecodeError> {
        let type_tag = reader.read_u16()?;
        let mut command = Self::empty(registry.create(type_tag)?);

        let (namespace, path) = envelope::decode_raw(reader)?;
        command.namespace = namespace;
        command.path = path;
        command.args.decode_raw(reader)?;

        Ok(command)
    }

    pub fn to_raw_bytes(&self) -> Vec<u8> {
        let mut writer = RawWriter::new();
        self.encode_raw(&mut writer);
        writer.into_vec()
    }

    /// Decodes a command that occupies all of `bytes`
    pub fn from_raw_bytes(
        registry: &Registry,
        bytes: &[u8],
    ) -> Result<Self, DecodeError> {
        Self::from_raw_bytes_with_config(registry, bytes, &WireConfig::default())
    }

    pub fn from_raw_bytes_with_config(
        registry: &Registry,
        bytes: &[u8],
        config: &WireConfig,
    ) -> Result<Self, DecodeError> {
        let mut reader = RawReader::with_config(bytes, config);
        let command = Self::decode_raw(registry, &mut reader)?;
        reader.finish()?;
        Ok(command)
    }

    // ------------------------------------------------------------------------
    // Field codec

    /// Writes a single field by its id
    ///
    /// Ids below [`ENVELOPE_FIELD_COUNT`] are the namespace and path, the
    /// rest belong to the variant. Ids past [`Command::field_count`] have
    /// nothing to write and report success.
    pub fn write_field<W: FieldWriter + ?Sized>(
        &self,
        writer: &mut W,
        id: u8,
    ) -> bool {
        if id < ENVELOPE_FIELD_COUNT {
            envelope::write_field(self.namespace(), &self.path, writer, id)
        } else {
            self.args.write_field(writer, id)
        }
    }

    /// Reads a single field by its id into this command
    pub fn read_field<R: FieldReader + ?Sized>(
        &mut self,
        reader: &mut R,
        id: u8,
    ) -> Result<(), DecodeError> {
        if id >= self.field_count() {
            return Err(DecodeError::CorruptCommand(
                CorruptReason::FieldOutOfRange {
                    id,
                    field_count: self.field_count(),
                },
            ));
        }

        if id < ENVELOPE_FIELD_COUNT {
            envelope::read_field(&mut self.namespace, &mut self.path, reader, id)
        } else {
            self.args.read_field(reader, id)
        }
    }

    /// Writes as much of the command as `writer` will take, starting from
    /// `progress` and advancing it past everything written
    ///
    /// Returns true once the header and every field have been written. When
    /// false, call again with the same `progress` after the writer has room;
    /// nothing already written is sent twice.
    pub fn write_fields<W: FieldWriter + ?Sized>(
        &self,
        writer: &mut W,
        progress: &mut SendProgress,
    ) -> bool {
        let field_count = self.field_count();

        loop {
            match *progress {
                SendProgress::NotStarted => {
                    let header = FieldHeader {
                        type_tag: self.type_tag(),
                        field_count,
                    };
                    if !writer.write_header(header) {
                        return false;
                    }
                    *progress = SendProgress::Field(0);
                }
                SendProgress::Field(id) if id >= field_count => {
                    *progress = SendProgress::Done;
                }
                SendProgress::Field(id) => {
                    if !self.write_field(writer, id) {
                        trace!("{} paused at field {}", self.name(), id);
                        return false;
                    }
                    *progress = SendProgress::Field(id + 1);
                }
                SendProgress::Done => return true,
            }
        }
    }

    /// Reads a whole command, creating it from the registry entry for the
    /// tag in the header
    ///
    /// Fields past those the variant declares, sent by a newer peer, are
    /// skipped. A header announcing fewer fields than declared is corrupt.
    pub fn read_fields<R: FieldReader + ?Sized>(
        registry: &Registry,
        reader: &mut R,
    ) -> Result<Self, DecodeError> {
        let header = reader.read_header()?;
        let mut command = Self::empty(registry.create(header.type_tag)?);
        let field_count = command.field_count();

        if header.field_count < field_count {
            return Err(DecodeError::CorruptCommand(
                CorruptReason::MissingFields {
                    expected: field_count,
                    actual: header.field_count,
                },
            ));
        }

        for id in 0..header.field_count {
            if id < field_count {
                command.read_field(reader, id)?;
            } else {
                let skipped = reader.skip_field()?;
                trace!("{} skipped unknown field {}", command.name(), skipped);
            }
        }

        Ok(command)
    }

    /// Encodes the whole command with the field codec in one go
    pub fn to_field_bytes(&self) -> Vec<u8> {
        let mut writer = BufferedFieldWriter::new(usize::max_value());
        let mut progress = SendProgress::default();
        let done = self.write_fields(&mut writer, &mut progress);
        debug_assert!(done, "Unbounded writer stopped at {:?}", progress);
        writer.take_bytes()
    }

    /// Decodes a field-encoded command that occupies all of `bytes`
    pub fn from_field_bytes(
        registry: &Registry,
        bytes: &[u8],
    ) -> Result<Self, DecodeError> {
        Self::from_field_bytes_with_config(
            registry,
            bytes,
            &WireConfig::default(),
        )
    }

    pub fn from_field_bytes_with_config(
        registry: &Registry,
        bytes: &[u8],
        config: &WireConfig,
    ) -> Result<Self, DecodeError> {
        let mut reader = SliceFieldReader::with_config(bytes, config);
        let command = Self::read_fields(registry, &mut reader)?;
        reader.finish()?;
        Ok(command)
    }
}
