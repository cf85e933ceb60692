use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to look up resource {name}: {source}")]
    Lookup {
        name: String,
        source: std::io::Error,
    },
    #[error("Failed to extract resource {name}: {source}")]
    Extract {
        name: String,
        source: std::io::Error,
    },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractError {
    pub(crate) fn lookup(name: &str, source: std::io::Error) -> Self {
        Self::Lookup {
            name: name.to_owned(),
            source,
        }
    }

    pub(crate) fn extract(name: &str, source: std::io::Error) -> Self {
        Self::Extract {
            name: name.to_owned(),
            source,
        }
    }
}

impl From<serde_json::Error> for ExtractError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
