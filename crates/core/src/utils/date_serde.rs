//! Lenient date deserialization for request payloads.
//!
//! Clients send RFC 3339 timestamps, naive ISO timestamps or bare dates;
//! all of them land in a UTC `NaiveDateTime`.

use chrono::NaiveDateTime;
use serde::{de::Error as _, Deserialize, Deserializer};

use super::time_utils::parse_date_param;

pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date_param(value)
            .map(Some)
            .map_err(|e| D::Error::custom(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Payload {
        #[serde(default, deserialize_with = "super::deserialize_optional")]
        when: Option<chrono::NaiveDateTime>,
    }

    #[test]
    fn accepts_all_supported_shapes() {
        let expected = NaiveDate::from_ymd_opt(2026, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        for raw in [
            r#"{"when":"2026-01-02"}"#,
            r#"{"when":"2026-01-02T00:00:00Z"}"#,
            r#"{"when":"2026-01-02T00:00:00"}"#,
        ] {
            let parsed: Payload = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed.when, Some(expected));
        }
        let missing: Payload = serde_json::from_str("{}").unwrap();
        assert!(missing.when.is_none());
        assert!(serde_json::from_str::<Payload>(r#"{"when":"soon"}"#).is_err());
    }
}
