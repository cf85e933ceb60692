use std::fs::File;
use std::io::{BufReader, Error, ErrorKind, Result};
use std::path::{Path, PathBuf};

use super::{ResourceLoader, ResourceStream};
use crate::name::ResourceName;

/// Resources stored as plain files below a root directory.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn locate(&self, name: &ResourceName) -> PathBuf {
        self.root.join(name.to_relative_path())
    }
}

impl ResourceLoader for DirectoryLoader {
    fn open(&self, name: &ResourceName) -> Result<Option<ResourceStream<'_>>> {
        let path = self.locate(name);
        log::trace!("Looking up {} at {}", name, path.display());

        // Directories are not resources.
        match path.metadata() {
            Ok(meta) if meta.is_dir() => return Ok(None),
            Err(e) if is_absent(&e) => return Ok(None),
            _ => {}
        }

        match File::open(&path) {
            Ok(file) => Ok(Some(Box::new(BufReader::new(file)))),
            Err(e) if is_absent(&e) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Errors meaning "there is no such file", as opposed to a file that
/// exists but cannot be read. A name running through a regular file
/// (`ENOTDIR`) or with an over-long segment (`ENAMETOOLONG`) names
/// nothing.
fn is_absent(e: &Error) -> bool {
    matches!(
        e.kind(),
        ErrorKind::NotFound
            | ErrorKind::NotADirectory
            | ErrorKind::InvalidFilename
    )
}
