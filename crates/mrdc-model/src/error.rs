use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read credentials {path}: {source}")]
    CredentialsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid credentials document: {0}")]
    CredentialsParse(#[from] serde_yaml::Error),

    #[error("unknown table '{0}'")]
    UnknownTable(String),

    #[error("unknown error policy '{0}' (expected 'continue' or 'abort')")]
    UnknownErrorPolicy(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
