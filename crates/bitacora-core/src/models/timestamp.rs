//! Display timestamp format shared by both record kinds
//!
//! Records carry a naive local timestamp rendered as `YYYY-MM-DD HH:MM:SS`.
//! Use with `#[serde(with = "timestamp")]`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};

/// Display format for record timestamps
pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a timestamp in the display format
pub fn display(ts: &NaiveDateTime) -> String {
    ts.format(FORMAT).to_string()
}

/// Parse a timestamp, accepting the display format or ISO 8601 `T` separator
pub fn parse(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&display(ts))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let s = String::deserialize(deserializer)?;
    parse(&s).ok_or_else(|| {
        Error::custom(format!(
            "Invalid timestamp: {}. Expected YYYY-MM-DD HH:MM:SS",
            s
        ))
    })
}
