//! Extract bundled resources into standalone temporary files.
//!
//! Some consumers cannot read from memory or from inside a bundle and need a
//! real path on disk, native libraries loaded with `dlopen` being the usual
//! example. [`ResourceExtractor`] looks a resource up through a
//! [`ResourceLoader`] and copies it into a fresh temporary file:
//!
//! ```no_run
//! use std::sync::Arc;
//! use resource_extractor::{EmbeddedBundle, ResourceExtractor};
//!
//! let bundle = EmbeddedBundle::new().with("greeting.txt", b"Hello, World!\n");
//! let extractor = ResourceExtractor::from_loader(Arc::new(bundle));
//!
//! if let Some(path) = extractor.extract_path("greeting.txt")? {
//!     println!("extracted to {}", path.display());
//! }
//! # Ok::<(), resource_extractor::ExtractError>(())
//! ```

pub mod anchor;
mod errors;
pub mod extractor;
pub mod loader;
pub mod name;
pub mod temp;

pub use anchor::TypeAnchor;
pub use errors::{ExtractError, Result};
pub use extractor::{ExtractedFile, ResolutionContext, ResourceExtractor};
pub use loader::{
    DirectoryLoader, EmbeddedBundle, ResourceLoader, ResourceStream,
    SearchPath,
};
pub use name::ResourceName;
pub use temp::TempFileOptions;

#[cfg(test)]
pub(crate) fn initialize() {
    let _ = env_logger::builder()
        .is_test(true)
        .try_init();
}
