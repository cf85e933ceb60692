use std::fs::File;
use std::io::{Read, Result as IoResult, Seek, SeekFrom, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{ExtractError, Result};

pub const DEFAULT_SUFFIX: &str = ".tmp";
pub const DEFAULT_RANDOM_LEN: usize = 10;

/// Naming hints and location for extracted temporary files.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TempFileOptions {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub directory: Option<PathBuf>,
    pub random_len: usize,
}

impl Default for TempFileOptions {
    fn default() -> Self {
        Self {
            prefix: None,
            suffix: None,
            directory: None,
            random_len: DEFAULT_RANDOM_LEN,
        }
    }
}

impl TempFileOptions {
    /// Options from the optional prefix and suffix hints; the rest is
    /// left at its default.
    pub fn from_hints(prefix: Option<&str>, suffix: Option<&str>) -> Self {
        Self {
            prefix: prefix.map(str::to_owned),
            suffix: suffix.map(str::to_owned),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn in_dir(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or("")
    }

    pub fn suffix(&self) -> &str {
        self.suffix.as_deref().unwrap_or(DEFAULT_SUFFIX)
    }

    /// Directory the file is created in, `TMPDIR` unless overridden.
    pub fn directory(&self) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }

    /// Prefix and suffix become part of a single file name, so they must
    /// not carry path separators.
    pub fn validate(&self) -> Result<()> {
        let hints = [("prefix", self.prefix()), ("suffix", self.suffix())];
        for (label, hint) in hints {
            if hint.contains(['/', '\\', '\0']) {
                return Err(ExtractError::Config(format!(
                    "{label} {hint:?} must not contain path separators"
                )));
            }
        }
        if self.random_len == 0 {
            return Err(ExtractError::Config(
                "random_len must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }

    /// Create a new, uniquely named and still empty file.
    pub(crate) fn create(&self) -> Result<TmpFile> {
        self.validate()?;
        let directory = self.directory();
        let file = tempfile::Builder::new()
            .prefix(self.prefix())
            .suffix(self.suffix())
            .rand_bytes(self.random_len)
            .tempfile_in(&directory)?;
        log::trace!("Created {}", file.path().display());
        Ok(TmpFile { file })
    }
}

/// A freshly created temporary file that is removed again on drop unless
/// it is [kept](TmpFile::keep).
pub(crate) struct TmpFile {
    file: tempfile::NamedTempFile,
}

impl TmpFile {
    #[cfg(test)]
    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    /// Replace whatever the file holds with everything `source` yields.
    pub fn fill_from(&mut self, source: &mut dyn Read) -> IoResult<u64> {
        let file = self.file.as_file_mut();
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        let copied = std::io::copy(source, file)?;
        file.flush()?;
        file.sync_data()?;
        Ok(copied)
    }

    /// Detach the file from automatic removal and hand it over.
    pub fn keep(self) -> IoResult<(File, PathBuf)> {
        self.file.keep().map_err(|e| e.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempdir::TempDir;

    #[test]
    fn default_naming() {
        let dir = TempDir::new("temp_options").unwrap();
        let options = TempFileOptions::default().in_dir(dir.path());
        let (_, path) = options.create().unwrap().keep().unwrap();

        let file_name = path.file_name().unwrap().to_str().unwrap();
        assert!(file_name.ends_with(DEFAULT_SUFFIX));
        assert_eq!(file_name.len(), DEFAULT_RANDOM_LEN + DEFAULT_SUFFIX.len());
        assert_eq!(path.parent().unwrap(), dir.path());
    }

    #[test]
    fn hints_shape_the_name() {
        let dir = TempDir::new("temp_options").unwrap();
        let options = TempFileOptions::from_hints(Some("libfoo-"), Some(".so"))
            .in_dir(dir.path());
        let (_, path) = options.create().unwrap().keep().unwrap();

        let file_name = path.file_name().unwrap().to_str().unwrap();
        assert!(file_name.starts_with("libfoo-"));
        assert!(file_name.ends_with(".so"));
    }

    #[test]
    fn dropped_files_are_removed() {
        let dir = TempDir::new("temp_options").unwrap();
        let tmp = TempFileOptions::default()
            .in_dir(dir.path())
            .create()
            .unwrap();
        let path = tmp.path().to_path_buf();
        assert!(path.exists());
        drop(tmp);
        assert!(!path.exists());
    }

    #[test]
    fn fill_replaces_existing_content() {
        let dir = TempDir::new("temp_options").unwrap();
        let mut tmp = TempFileOptions::default()
            .in_dir(dir.path())
            .create()
            .unwrap();
        std::fs::write(tmp.path(), "stale content that is longer").unwrap();

        let copied = tmp.fill_from(&mut Cursor::new(b"fresh")).unwrap();
        let (_, path) = tmp.keep().unwrap();

        assert_eq!(copied, 5);
        assert_eq!(std::fs::read(path).unwrap(), b"fresh");
    }

    #[test]
    fn separators_are_rejected() {
        let options = TempFileOptions::default().with_prefix("../evil");
        assert!(matches!(options.validate(), Err(ExtractError::Config(_))));

        let options = TempFileOptions::default().with_suffix("a\\b");
        assert!(matches!(options.validate(), Err(ExtractError::Config(_))));
    }

    #[test]
    fn options_from_json() {
        let options = TempFileOptions::from_json(
            r#"{ "prefix": "font-", "directory": "/var/tmp" }"#,
        )
        .unwrap();
        assert_eq!(options.prefix(), "font-");
        assert_eq!(options.suffix(), DEFAULT_SUFFIX);
        assert_eq!(options.directory(), PathBuf::from("/var/tmp"));
        assert_eq!(options.random_len, DEFAULT_RANDOM_LEN);

        assert!(matches!(
            TempFileOptions::from_json(r#"{ "prefix": 42 }"#),
            Err(ExtractError::Config(_))
        ));
        assert!(matches!(
            TempFileOptions::from_json(r#"{ "random_len": 0 }"#),
            Err(ExtractError::Config(_))
        ));
    }
}
