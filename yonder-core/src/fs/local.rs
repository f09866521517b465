use super::{ExecutionContext, UNCHANGED_TIME};
use crate::path::PathValue;
use chrono::{TimeZone, Utc};
use log::trace;
use std::collections::HashSet;
use std::fs::{self, File, FileTimes, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Execution context backed by a directory on the local machine, where
/// the root path of every command maps to that directory
#[derive(Clone, Debug)]
pub struct LocalFileSystem {
    root: PathBuf,
}

impl LocalFileSystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location on the local machine that `path` refers to
    pub fn local_path(&self, path: &PathValue) -> PathBuf {
        let mut local = self.root.clone();
        for segment in path.segments() {
            local.push(segment);
        }
        local
    }
}

impl ExecutionContext for LocalFileSystem {
    type Error = io::Error;

    fn list_children(
        &self,
        path: &PathValue,
    ) -> Result<HashSet<PathValue>, Self::Error> {
        let mut children = HashSet::new();

        for entry in fs::read_dir(self.local_path(path))? {
            let name = entry?.file_name().into_string().map_err(|name| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Entry name is not utf-8: {:?}", name),
                )
            })?;

            let child = path.join(&name).map_err(|x| {
                io::Error::new(io::ErrorKind::InvalidData, x.to_string())
            })?;
            children.insert(child);
        }

        Ok(children)
    }

    fn set_times(
        &self,
        path: &PathValue,
        access_time: i64,
        modification_time: i64,
    ) -> Result<(), Self::Error> {
        let file = open_for_times(&self.local_path(path))?;

        let mut times = FileTimes::new();
        if access_time != UNCHANGED_TIME {
            times = times.set_accessed(to_system_time(access_time)?);
        }
        if modification_time != UNCHANGED_TIME {
            times = times.set_modified(to_system_time(modification_time)?);
        }

        trace!(
            "Setting times of {} to {:?}/{:?}",
            path,
            access_time,
            modification_time
        );
        file.set_times(times)
    }

    fn exists(&self, path: &PathValue) -> Result<bool, Self::Error> {
        self.local_path(path).try_exists()
    }

    fn delete(
        &self,
        path: &PathValue,
        recursive: bool,
    ) -> Result<bool, Self::Error> {
        if path.is_root() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "Refusing to delete root",
            ));
        }

        let local = self.local_path(path);
        let metadata = match fs::symlink_metadata(&local) {
            Ok(x) => x,
            Err(x) if x.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(x) => return Err(x),
        };

        if metadata.is_dir() {
            if recursive {
                fs::remove_dir_all(&local)?;
            } else {
                fs::remove_dir(&local)?;
            }
        } else {
            fs::remove_file(&local)?;
        }

        Ok(true)
    }

    fn rename(
        &self,
        from: &PathValue,
        to: &PathValue,
    ) -> Result<(), Self::Error> {
        fs::rename(self.local_path(from), self.local_path(to))
    }

    fn mkdirs(&self, path: &PathValue) -> Result<(), Self::Error> {
        fs::create_dir_all(self.local_path(path))
    }
}

/// Opens `path` for updating its times, which only needs write access;
/// directories and read-only files fall back to a read handle
fn open_for_times(path: &Path) -> io::Result<File> {
    match OpenOptions::new().write(true).open(path) {
        Ok(file) => Ok(file),
        Err(x) if x.kind() == io::ErrorKind::NotFound => Err(x),
        Err(_) => File::open(path),
    }
}

fn to_system_time(millis: i64) -> io::Result<SystemTime> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(SystemTime::from)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Timestamp out of range: {}", millis),
            )
        })
}
