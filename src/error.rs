use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no config directory available")]
    NoConfigDir,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("failed to write config: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("malformed key material: {0}")]
    Key(String),
}

pub type Result<T> = std::result::Result<T, Error>;
