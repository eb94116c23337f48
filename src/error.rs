use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlasmapError {
    #[error("missing required field `{0}`")]
    MissingField(String),

    #[error("failed to parse JSON record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse YAML record: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse style file: {0}")]
    Style(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("export failed: {0}")]
    Export(String),

    #[error("invalid option: {0}")]
    InvalidOption(String),
}

pub type Result<T> = std::result::Result<T, PlasmapError>;
