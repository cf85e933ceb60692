mod directory;
mod embedded;
mod search_path;

use std::fmt::Debug;
use std::io::{Read, Result};

use crate::name::ResourceName;

pub use directory::DirectoryLoader;
pub use embedded::EmbeddedBundle;
pub use search_path::SearchPath;

/// Readable byte stream of a single resource.
pub type ResourceStream<'a> = Box<dyn Read + Send + 'a>;

/// Something that can turn a resource name into a byte stream.
///
/// `Ok(None)` means the loader does not know the name. Errors are reserved
/// for resources that exist but cannot be read.
pub trait ResourceLoader: Send + Sync + Debug {
    fn open(&self, name: &ResourceName) -> Result<Option<ResourceStream<'_>>>;

    fn contains(&self, name: &ResourceName) -> Result<bool> {
        Ok(self.open(name)?.is_some())
    }
}
