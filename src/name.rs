use std::fmt;
use std::path::PathBuf;

/// A normalized, root-relative resource name.
///
/// Names are `/`-separated. Empty and `.` segments are dropped and `..`
/// removes the preceding segment. Anything that cannot be normalized
/// (climbing above the root, an empty result, backslashes or NUL bytes)
/// has no `ResourceName` and therefore never resolves.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ResourceName {
    normalized: String,
}

impl ResourceName {
    /// Normalize `name` relative to the resource root.
    ///
    /// A leading `/` is accepted and ignored.
    pub fn new(name: &str) -> Option<Self> {
        Self::resolve("", name)
    }

    /// Normalize `name` relative to `base`, unless `name` starts with `/`,
    /// in which case it is taken from the root.
    pub fn resolve(base: &str, name: &str) -> Option<Self> {
        let mut segments: Vec<&str> = Vec::new();
        let joined = match name.strip_prefix('/') {
            Some(absolute) => absolute.split('/').collect::<Vec<_>>(),
            None => base.split('/').chain(name.split('/')).collect(),
        };

        for segment in joined {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop()?;
                }
                s if s.contains('\\') || s.contains('\0') => return None,
                s => segments.push(s),
            }
        }

        if segments.is_empty() {
            return None;
        }

        Some(Self {
            normalized: segments.join("/"),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.normalized.split('/')
    }

    /// Last segment of the name, e.g. `font.ttf` for `assets/font.ttf`.
    pub fn file_name(&self) -> &str {
        self.normalized
            .rsplit('/')
            .next()
            .unwrap_or(&self.normalized)
    }

    /// The name as a relative filesystem path.
    pub fn to_relative_path(&self) -> PathBuf {
        self.segments().collect()
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

impl AsRef<str> for ResourceName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
