use std::any::type_name;
use std::io::Result;
use std::sync::Arc;

use crate::loader::{ResourceLoader, ResourceStream};
use crate::name::ResourceName;

/// A loader scoped to the package of a Rust type.
///
/// The package is the module path of the type with `::` turned into `/`,
/// so resources of `my_app::assets::Fonts` live under `my_app/assets/`.
/// Relative names are resolved inside the package, names starting with
/// `/` from the root of the loader.
#[derive(Clone, Debug)]
pub struct TypeAnchor {
    package: String,
    loader: Arc<dyn ResourceLoader>,
}

impl TypeAnchor {
    pub fn of<T: ?Sized>(loader: Arc<dyn ResourceLoader>) -> Self {
        Self::with_package(package_of(type_name::<T>()), loader)
    }

    pub fn with_package(
        package: impl Into<String>,
        loader: Arc<dyn ResourceLoader>,
    ) -> Self {
        let package = package.into().trim_matches('/').to_owned();
        Self { package, loader }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn loader(&self) -> &Arc<dyn ResourceLoader> {
        &self.loader
    }

    /// Absolute resource name `name` refers to from this anchor.
    pub fn resolve(&self, name: &str) -> Option<ResourceName> {
        ResourceName::resolve(&self.package, name)
    }

    pub fn open(&self, name: &str) -> Result<Option<ResourceStream<'_>>> {
        match self.resolve(name) {
            Some(resolved) => {
                log::trace!(
                    "{} resolved to {} from {}",
                    name,
                    resolved,
                    self.package
                );
                self.loader.open(&resolved)
            }
            None => Ok(None),
        }
    }
}

/// `a::b::C<d::E>` becomes `a/b`.
///
/// References, raw pointers and trait objects anchor at the type they point
/// to, slices and arrays at their element type. Tuples, primitives and
/// function pointers have no module and anchor at the loader root.
fn package_of(type_name: &str) -> String {
    const SIGILS: [&str; 5] = ["&mut ", "&", "*const ", "*mut ", "dyn "];

    let mut name = type_name.trim();
    while let Some(rest) = SIGILS
        .iter()
        .find_map(|sigil| name.strip_prefix(sigil))
    {
        name = rest.trim_start();
    }

    if let Some(inner) = name.strip_prefix('[') {
        let inner = inner.strip_suffix(']').unwrap_or(inner);
        let element = match inner.rsplit_once(';') {
            Some((element, _)) => element,
            None => inner,
        };
        return package_of(element);
    }
    let no_module = ["(", "fn(", "unsafe ", "extern "];
    if no_module.iter().any(|start| name.starts_with(start)) {
        return String::new();
    }

    // Drop generic arguments and extra trait object bounds.
    let end = name.find(['<', ' ', '+']).unwrap_or(name.len());
    match name[..end].rsplit_once("::") {
        Some((module, _)) => module.replace("::", "/"),
        None => String::new(),
    }
}
