use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Unknown species: {0}")]
    UnknownSpecies(String),

    #[error("Invalid species definition for {name}: {reason}")]
    InvalidSpecies { name: String, reason: String },

    #[error("Species table is empty")]
    EmptySpeciesTable,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Species table parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
