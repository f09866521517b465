use std::collections::HashMap;

/// Execution contexts hosted by a node, keyed by namespace, where the
/// absence of a namespace refers to the default context
#[derive(Debug)]
pub struct Namespaces<C> {
    default: Option<C>,
    named: HashMap<String, C>,
}

impl<C> Namespaces<C> {
    pub fn new() -> Self {
        Self {
            default: None,
            named: HashMap::new(),
        }
    }

    pub fn with_default(ctx: C) -> Self {
        let mut namespaces = Self::new();
        namespaces.set_default(ctx);
        namespaces
    }

    /// Replaces the default context, returning the previous one
    pub fn set_default(&mut self, ctx: C) -> Option<C> {
        self.default.replace(ctx)
    }

    /// Hosts `ctx` under `name`, returning any context it replaced
    pub fn insert(&mut self, name: impl Into<String>, ctx: C) -> Option<C> {
        self.named.insert(name.into(), ctx)
    }

    pub fn remove(&mut self, name: &str) -> Option<C> {
        self.named.remove(name)
    }

    /// Context for `namespace`, or the default context for `None`
    pub fn resolve(&self, namespace: Option<&str>) -> Option<&C> {
        match namespace {
            Some(name) => self.named.get(name),
            None => self.default.as_ref(),
        }
    }

    pub fn contains(&self, namespace: Option<&str>) -> bool {
        self.resolve(namespace).is_some()
    }

    /// Names of every named namespace, excluding the default
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.named.keys().map(String::as_str)
    }
}

impl<C> Default for Namespaces<C> {
    fn default() -> Self {
        Self::new()
    }
}
