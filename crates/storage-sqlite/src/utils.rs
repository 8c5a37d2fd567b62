//! Helpers for JSON text columns and stored enum values.

use std::str::FromStr;

use fintrack_core::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{IntoCore, StorageError};

/// Encodes a value for a JSON text column.
pub fn to_json_text<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).into_core()
}

/// Decodes a JSON text column. An empty column reads as the default value.
pub fn from_json_text<T: DeserializeOwned + Default>(raw: &str) -> Result<T> {
    if raw.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(raw).into_core()
}

/// Parses a stored enum value, reporting corruption as a storage error.
pub fn parse_stored<T: FromStr>(column: &str, raw: &str) -> Result<T> {
    raw.parse::<T>().map_err(|_| {
        StorageError::InvalidValue(format!("Unexpected value '{raw}' in column {column}")).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_text_round_trips_and_tolerates_empty() {
        let tags = vec!["travel".to_string(), "work".to_string()];
        let raw = to_json_text(&tags).unwrap();
        assert_eq!(raw, r#"["travel","work"]"#);
        assert_eq!(from_json_text::<Vec<String>>(&raw).unwrap(), tags);
        assert!(from_json_text::<Vec<String>>("").unwrap().is_empty());
        assert!(from_json_text::<Vec<String>>("not json").is_err());
    }

    #[test]
    fn unknown_enum_values_are_storage_errors() {
        let err = parse_stored::<fintrack_core::users::UserRole>("role", "root").unwrap_err();
        assert!(matches!(err, fintrack_core::Error::Database(_)));
    }
}
