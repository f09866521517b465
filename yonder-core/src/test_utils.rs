use crate::{
    fs::{ExecutionContext, UNCHANGED_TIME},
    path::PathValue,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use yonder_derive::Error;
use yonder_wire::{BufferedFieldWriter, FieldHeader, FieldWriter};

pub fn path(s: &str) -> PathValue {
    PathValue::parse(s).unwrap()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StubError {
    NotFound(PathValue),
    NotEmpty(PathValue),
}

/// In-memory execution context holding a fixed tree and per-path times
#[derive(Debug, Default)]
pub struct StubContext {
    pub children: HashMap<PathValue, HashSet<PathValue>>,
    pub times: Mutex<HashMap<PathValue, (i64, i64)>>,
    pub renames: Mutex<Vec<(PathValue, PathValue)>>,
}

impl StubContext {
    pub fn with_children(mut self, parent: &str, children: &[&str]) -> Self {
        self.children.insert(
            path(parent),
            children.iter().map(|c| path(c)).collect(),
        );
        self
    }

    pub fn with_times(self, p: &str, access: i64, modification: i64) -> Self {
        self.times
            .lock()
            .unwrap()
            .insert(path(p), (access, modification));
        self
    }

    pub fn times_of(&self, p: &str) -> Option<(i64, i64)> {
        self.times.lock().unwrap().get(&path(p)).copied()
    }

    fn is_known(&self, p: &PathValue) -> bool {
        self.children.contains_key(p)
            || self.children.values().any(|c| c.contains(p))
            || self.times.lock().unwrap().contains_key(p)
    }
}

impl ExecutionContext for StubContext {
    type Error = StubError;

    fn list_children(
        &self,
        path: &PathValue,
    ) -> Result<HashSet<PathValue>, Self::Error> {
        self.children
            .get(path)
            .cloned()
            .ok_or_else(|| StubError::NotFound(path.clone()))
    }

    fn set_times(
        &self,
        path: &PathValue,
        access_time: i64,
        modification_time: i64,
    ) -> Result<(), Self::Error> {
        let mut times = self.times.lock().unwrap();
        let entry = times
            .get_mut(path)
            .ok_or_else(|| StubError::NotFound(path.clone()))?;

        if access_time != UNCHANGED_TIME {
            entry.0 = access_time;
        }
        if modification_time != UNCHANGED_TIME {
            entry.1 = modification_time;
        }

        Ok(())
    }

    fn exists(&self, path: &PathValue) -> Result<bool, Self::Error> {
        Ok(self.is_known(path))
    }

    fn delete(
        &self,
        path: &PathValue,
        recursive: bool,
    ) -> Result<bool, Self::Error> {
        let has_children = self
            .children
            .get(path)
            .map(|c| !c.is_empty())
            .unwrap_or(false);

        if has_children && !recursive {
            Err(StubError::NotEmpty(path.clone()))
        } else {
            Ok(self.is_known(path))
        }
    }

    fn rename(
        &self,
        from: &PathValue,
        to: &PathValue,
    ) -> Result<(), Self::Error> {
        if !self.is_known(from) {
            return Err(StubError::NotFound(from.clone()));
        }

        self.renames
            .lock()
            .unwrap()
            .push((from.clone(), to.clone()));
        Ok(())
    }

    fn mkdirs(&self, _: &PathValue) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Writer over a buffered writer that accepts a single field per flush,
/// standing in for a channel that drains slowly
pub struct OneFieldPerFlush {
    pub inner: BufferedFieldWriter,
    accepted: bool,
}

impl OneFieldPerFlush {
    pub fn new() -> Self {
        Self {
            inner: BufferedFieldWriter::new(usize::max_value()),
            accepted: false,
        }
    }

    /// Allows one more field to be written
    pub fn flush(&mut self) {
        self.accepted = false;
    }

    fn accept<F>(&mut self, write: F) -> bool
    where
        F: FnOnce(&mut BufferedFieldWriter) -> bool,
    {
        if self.accepted {
            return false;
        }

        self.accepted = write(&mut self.inner);
        self.accepted
    }
}

impl FieldWriter for OneFieldPerFlush {
    fn write_header(&mut self, header: FieldHeader) -> bool {
        self.inner.write_header(header)
    }

    fn write_bool(&mut self, id: u8, value: bool) -> bool {
        self.accept(|w| w.write_bool(id, value))
    }

    fn write_i64(&mut self, id: u8, value: i64) -> bool {
        self.accept(|w| w.write_i64(id, value))
    }

    fn write_str(&mut self, id: u8, value: &str) -> bool {
        self.accept(|w| w.write_str(id, value))
    }

    fn write_opt_str(&mut self, id: u8, value: Option<&str>) -> bool {
        self.accept(|w| w.write_opt_str(id, value))
    }

    fn write_str_seq(&mut self, id: u8, values: &[String]) -> bool {
        self.accept(|w| w.write_str_seq(id, values))
    }
}
