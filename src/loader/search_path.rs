use std::io::Result;
use std::sync::Arc;

use super::{ResourceLoader, ResourceStream};
use crate::name::ResourceName;

/// Ordered list of loaders, consulted first to last.
///
/// The first loader that knows a name serves it; later loaders are never
/// asked. An error from any loader stops the search.
#[derive(Clone, Default, Debug)]
pub struct SearchPath {
    loaders: Vec<Arc<dyn ResourceLoader>>,
}

impl SearchPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, loader: impl ResourceLoader + 'static) -> &mut Self {
        self.loaders.push(Arc::new(loader));
        self
    }

    pub fn push_shared(&mut self, loader: Arc<dyn ResourceLoader>) -> &mut Self {
        self.loaders.push(loader);
        self
    }

    pub fn with(mut self, loader: impl ResourceLoader + 'static) -> Self {
        self.push(loader);
        self
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl ResourceLoader for SearchPath {
    fn open(&self, name: &ResourceName) -> Result<Option<ResourceStream<'_>>> {
        for (i, loader) in self.loaders.iter().enumerate() {
            if let Some(stream) = loader.open(name)? {
                log::trace!("{} found by loader #{}", name, i);
                return Ok(Some(stream));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{DirectoryLoader, EmbeddedBundle};
    use std::fs;
    use std::io::Read;
    use tempdir::TempDir;

    fn read(path: &SearchPath, name: &str) -> Option<String> {
        let name = ResourceName::new(name).unwrap();
        let mut stream = path.open(&name).unwrap()?;
        let mut content = String::new();
        stream.read_to_string(&mut content).unwrap();
        Some(content)
    }

    #[test]
    fn first_match_wins() {
        let dir = TempDir::new("search_path").unwrap();
        fs::write(dir.path().join("shared.txt"), "from directory").unwrap();
        fs::write(dir.path().join("only-dir.txt"), "directory only").unwrap();

        let path = SearchPath::new()
            .with(EmbeddedBundle::new().with("shared.txt", b"from bundle"))
            .with(DirectoryLoader::new(dir.path()));

        assert_eq!(path.len(), 2);
        assert_eq!(read(&path, "shared.txt").unwrap(), "from bundle");
        assert_eq!(read(&path, "only-dir.txt").unwrap(), "directory only");
        assert!(read(&path, "nowhere.txt").is_none());
    }

    #[test]
    fn errors_stop_the_search() {
        #[derive(Debug)]
        struct Locked;

        impl ResourceLoader for Locked {
            fn open(
                &self,
                _: &ResourceName,
            ) -> Result<Option<ResourceStream<'_>>> {
                Err(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "locked",
                ))
            }
        }

        let path = SearchPath::new()
            .with(Locked)
            .with(EmbeddedBundle::new().with("greeting.txt", b"unreached"));
        let name = ResourceName::new("greeting.txt").unwrap();

        let err = path.open(&name).err().unwrap();
        assert_eq!(err.kind(), std::io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn names_through_a_file_fall_through() {
        let dir = TempDir::new("search_path").unwrap();
        fs::write(dir.path().join("assets"), "a file, not a folder").unwrap();

        let path = SearchPath::new()
            .with(DirectoryLoader::new(dir.path()))
            .with(EmbeddedBundle::new().with("assets/logo.txt", b"logo"));

        assert_eq!(read(&path, "assets/logo.txt").unwrap(), "logo");
    }

    #[test]
    fn empty_path_finds_nothing() {
        let path = SearchPath::new();
        assert!(path.is_empty());
        assert!(read(&path, "greeting.txt").is_none());
    }
}
