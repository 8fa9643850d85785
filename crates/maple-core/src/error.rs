//! Error types for Maple

use thiserror::Error;

/// The main error type for Maple operations
#[derive(Debug, Error)]
pub enum MapleError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Invalid enum value: {value} is not one of {allowed:?}")]
    InvalidEnumValue {
        value: String,
        allowed: Vec<String>,
    },
}

/// Result type alias for Maple operations
pub type Result<T> = std::result::Result<T, MapleError>;

impl From<toml::de::Error> for MapleError {
    fn from(err: toml::de::Error) -> Self {
        MapleError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for MapleError {
    fn from(err: toml::ser::Error) -> Self {
        MapleError::TomlSerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message() {
        let err = MapleError::ValueOutOfRange {
            field: "alpha".into(),
            min: 0.0,
            max: 1.0,
            value: 2.0,
        };
        assert_eq!(
            err.to_string(),
            "Value out of range: alpha must be between 0 and 1, got 2"
        );
    }

    #[test]
    fn toml_error_converts() {
        let parsed: std::result::Result<toml::value::Table, _> = toml::from_str("capacity = [");
        let err: MapleError = parsed.unwrap_err().into();
        assert!(matches!(err, MapleError::TomlParseError(_)));
    }
}
