use thiserror::Error;

#[derive(Error, Debug)]
pub enum HegemonError {
    #[error("Faction not found: {0:?}")]
    FactionNotFound(crate::core::types::FactionId),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Rule file error: {0}")]
    RuleFileError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, HegemonError>;
