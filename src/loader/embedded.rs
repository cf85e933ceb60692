use std::collections::BTreeMap;
use std::io::{Cursor, Result};

use super::{ResourceLoader, ResourceStream};
use crate::name::ResourceName;

/// Resources compiled into the binary.
///
/// Usually built with [`embedded_bundle!`](crate::embedded_bundle), which
/// pulls each file in with `include_bytes!`.
#[derive(Clone, Default, Debug)]
pub struct EmbeddedBundle {
    entries: BTreeMap<String, &'static [u8]>,
}

impl EmbeddedBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `data` under `name`. Names that do not normalize are
    /// ignored, since nothing could ever look them up.
    pub fn insert(&mut self, name: &str, data: &'static [u8]) -> &mut Self {
        match ResourceName::new(name) {
            Some(normalized) => {
                log::trace!(
                    "Embedding {} ({} bytes)",
                    normalized,
                    data.len()
                );
                self.entries
                    .insert(normalized.as_str().to_owned(), data);
            }
            None => log::warn!("Ignoring unresolvable resource name {name:?}"),
        }
        self
    }

    pub fn with(mut self, name: &str, data: &'static [u8]) -> Self {
        self.insert(name, data);
        self
    }

    pub fn get(&self, name: &ResourceName) -> Option<&'static [u8]> {
        self.entries.get(name.as_str()).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResourceLoader for EmbeddedBundle {
    fn open(&self, name: &ResourceName) -> Result<Option<ResourceStream<'_>>> {
        Ok(self
            .get(name)
            .map(|data| Box::new(Cursor::new(data)) as ResourceStream<'_>))
    }

    fn contains(&self, name: &ResourceName) -> Result<bool> {
        Ok(self.entries.contains_key(name.as_str()))
    }
}

/// Build an [`EmbeddedBundle`] from files next to the calling crate's
/// `Cargo.toml`.
///
/// ```ignore
/// let bundle = embedded_bundle! {
///     "native/libfoo.so" => "assets/libfoo.so",
///     "greeting.txt" => "assets/greeting.txt",
/// };
/// ```
#[macro_export]
macro_rules! embedded_bundle {
    ($($name:expr => $file:literal),* $(,)?) => {{
        let mut bundle = $crate::EmbeddedBundle::new();
        $(
            bundle.insert(
                $name,
                include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/", $file)),
            );
        )*
        bundle
    }};
}
