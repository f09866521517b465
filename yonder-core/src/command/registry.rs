use super::CommandArgs;
use crate::error::{DecodeError, RegistryError};
use std::collections::HashMap;

/// Produces the empty form of a variant, to be populated by a decoder
pub type Factory = fn() -> CommandArgs;

/// Maps type tags read off the wire to the variant they identify
#[derive(Clone, Debug)]
pub struct Registry {
    factories: HashMap<u16, Factory>,
}

impl Registry {
    /// Registry without any variants
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Adds a variant, failing if its tag is taken or if the factory does
    /// not produce a variant with that tag
    pub fn register(
        &mut self,
        type_tag: u16,
        factory: Factory,
    ) -> Result<(), RegistryError> {
        if self.factories.contains_key(&type_tag) {
            return Err(RegistryError::DuplicateTypeTag(type_tag));
        }

        let produced = factory().type_tag();
        if produced != type_tag {
            return Err(RegistryError::TypeTagMismatch {
                registered: type_tag,
                produced,
            });
        }

        self.factories.insert(type_tag, factory);
        Ok(())
    }

    /// Creates the empty variant for `type_tag`
    pub fn create(&self, type_tag: u16) -> Result<CommandArgs, DecodeError> {
        self.factories
            .get(&type_tag)
            .map(|factory| factory())
            .ok_or(DecodeError::UnknownTypeTag(type_tag))
    }

    pub fn contains(&self, type_tag: u16) -> bool {
        self.factories.contains_key(&type_tag)
    }

    /// All registered tags in ascending order
    pub fn type_tags(&self) -> Vec<u16> {
        let mut tags: Vec<u16> = self.factories.keys().copied().collect();
        tags.sort_unstable();
        tags
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

/// Registry holding every built-in variant
impl Default for Registry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for (type_tag, factory) in CommandArgs::builtins() {
            registry.factories.insert(type_tag, factory);
        }
        registry
    }
}
