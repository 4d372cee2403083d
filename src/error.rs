use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("mood must be between 1 and 5, got {0}")]
    MoodOutOfRange(u8),
    #[error("unknown screen: {0}")]
    UnknownScreen(String),
    #[error("unknown meal type: {0}")]
    UnknownMealType(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[source] std::io::Error),
    #[error("failed to parse config: {0}")]
    TomlDecode(#[source] toml::de::Error),
    #[error("failed to encode config: {0}")]
    TomlEncode(#[source] toml::ser::Error),
    #[error("no config path: pass --config <path>, set WELLNESS_CONFIG, or set HOME")]
    NoConfigPath,
}
