use std::fs::File;
use std::io::{Read, Result as IoResult, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::anchor::TypeAnchor;
use crate::errors::{ExtractError, Result};
use crate::loader::{ResourceLoader, ResourceStream};
use crate::name::ResourceName;
use crate::temp::TempFileOptions;

/// Where resource names are looked up.
#[derive(Clone, Debug)]
pub enum ResolutionContext {
    /// Names are relative to the package of a type.
    TypeRelative(TypeAnchor),
    /// Names are taken from the root of a loader as given.
    LoaderRelative(Arc<dyn ResourceLoader>),
}

impl ResolutionContext {
    fn open(&self, name: &str) -> IoResult<Option<ResourceStream<'_>>> {
        match self {
            Self::TypeRelative(anchor) => anchor.open(name),
            Self::LoaderRelative(loader) => {
                // Loaders have no notion of a current package, so rooted
                // names are not theirs to resolve.
                if name.starts_with('/') {
                    return Ok(None);
                }
                match ResourceName::new(name) {
                    Some(resolved) => loader.open(&resolved),
                    None => Ok(None),
                }
            }
        }
    }
}

/// Extracts bundled resources into standalone temporary files, for
/// consumers that need a real path on disk (native libraries, external
/// tools).
///
/// A resource that does not exist yields `Ok(None)`. Errors are reserved
/// for a broken environment: an unreadable resource, a temporary directory
/// that cannot be written, a full disk.
///
/// Extracted files are never removed by the extractor; deleting them is
/// up to the caller.
#[derive(Clone, Debug)]
pub struct ResourceExtractor {
    context: ResolutionContext,
}

impl ResourceExtractor {
    /// Resolve names relative to the package of `T`, using `loader`.
    pub fn for_type<T: ?Sized>(loader: Arc<dyn ResourceLoader>) -> Self {
        Self::from_anchor(TypeAnchor::of::<T>(loader))
    }

    pub fn from_anchor(anchor: TypeAnchor) -> Self {
        Self {
            context: ResolutionContext::TypeRelative(anchor),
        }
    }

    /// Resolve names from the root of `loader`.
    pub fn from_loader(loader: Arc<dyn ResourceLoader>) -> Self {
        Self {
            context: ResolutionContext::LoaderRelative(loader),
        }
    }

    pub fn context(&self) -> &ResolutionContext {
        &self.context
    }

    /// Open the resource without extracting it.
    pub fn open(&self, name: &str) -> Result<Option<ResourceStream<'_>>> {
        self.context
            .open(name)
            .map_err(|e| ExtractError::lookup(name, e))
    }

    pub fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.open(name)?.is_some())
    }

    /// Copy the resource `name` into a new temporary file and return its
    /// path. `prefix` and `suffix` are used to name the file.
    pub fn extract_as_path(
        &self,
        name: &str,
        prefix: Option<&str>,
        suffix: Option<&str>,
    ) -> Result<Option<PathBuf>> {
        let options = TempFileOptions::from_hints(prefix, suffix);
        self.extract_path_with(name, &options)
    }

    /// Same as [`extract_as_path`](Self::extract_as_path) but hands out
    /// the open file together with its path.
    pub fn extract_as_file(
        &self,
        name: &str,
        prefix: Option<&str>,
        suffix: Option<&str>,
    ) -> Result<Option<ExtractedFile>> {
        let options = TempFileOptions::from_hints(prefix, suffix);
        self.extract_file_with(name, &options)
    }

    pub fn extract_path(&self, name: &str) -> Result<Option<PathBuf>> {
        self.extract_as_path(name, None, None)
    }

    pub fn extract_file(&self, name: &str) -> Result<Option<ExtractedFile>> {
        self.extract_as_file(name, None, None)
    }

    pub fn extract_path_with(
        &self,
        name: &str,
        options: &TempFileOptions,
    ) -> Result<Option<PathBuf>> {
        Ok(self
            .extract_file_with(name, options)?
            .map(ExtractedFile::into_path))
    }

    pub fn extract_file_with(
        &self,
        name: &str,
        options: &TempFileOptions,
    ) -> Result<Option<ExtractedFile>> {
        let mut stream = match self.open(name)? {
            Some(stream) => stream,
            None => {
                log::debug!("Resource {} not found", name);
                return Ok(None);
            }
        };

        let mut tmp = options.create().map_err(|e| match e {
            ExtractError::Io(e) => ExtractError::extract(name, e),
            other => other,
        })?;
        // On failure `tmp` is dropped, which removes the partial file.
        let bytes = tmp
            .fill_from(&mut stream)
            .map_err(|e| ExtractError::extract(name, e))?;
        drop(stream);

        let (mut file, path) =
            tmp.keep().map_err(|e| ExtractError::extract(name, e))?;
        file.seek(SeekFrom::Start(0))
            .map_err(|e| ExtractError::extract(name, e))?;

        log::debug!(
            "Extracted {} ({} bytes) to {}",
            name,
            bytes,
            path.display()
        );
        Ok(Some(ExtractedFile { file, path }))
    }
}

impl From<TypeAnchor> for ResourceExtractor {
    fn from(anchor: TypeAnchor) -> Self {
        Self::from_anchor(anchor)
    }
}

impl From<Arc<dyn ResourceLoader>> for ResourceExtractor {
    fn from(loader: Arc<dyn ResourceLoader>) -> Self {
        Self::from_loader(loader)
    }
}

/// A resource copied to disk: an open handle positioned at the start of
/// the content, and the path of the file.
///
/// Dropping it closes the handle but keeps the file.
#[derive(Debug)]
pub struct ExtractedFile {
    file: File,
    path: PathBuf,
}

impl ExtractedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file(&self) -> &File {
        &self.file
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }

    pub fn into_file(self) -> File {
        self.file
    }

    pub fn into_parts(self) -> (File, PathBuf) {
        (self.file, self.path)
    }
}

impl Read for &ExtractedFile {
    fn read(&mut self, buf: &mut [u8]) -> IoResult<usize> {
        (&self.file).read(buf)
    }
}

impl Read for ExtractedFile {
    fn read(&mut self, buf: &mut [u8]) -> IoResult<usize> {
        self.file.read(buf)
    }
}

impl AsRef<Path> for ExtractedFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}
