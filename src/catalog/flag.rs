//! Boolean flag literals
//!
//! Registry listings historically spell flags as the quoted strings
//! `"True"` and `"False"`. They are converted to `bool` here, once, when
//! data enters the crate.

use crate::error::{RegistryError, Result};
use serde::{Deserialize, Deserializer};

/// Parse a flag literal into a `bool`
///
/// Accepts `"True"`/`"False"` and the lowercase TOML/JSON spellings.
/// Surrounding whitespace is ignored.
pub fn parse_flag(literal: &str) -> Result<bool> {
    match literal.trim() {
        "True" | "true" => Ok(true),
        "False" | "false" => Ok(false),
        other => Err(RegistryError::InvalidFlag(other.to_string())),
    }
}

/// Render a flag the way legacy listings spell it
pub fn format_flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Serde helper: accept a native bool or a flag literal
pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlagValue {
        Native(bool),
        Literal(String),
    }

    match FlagValue::deserialize(deserializer)? {
        FlagValue::Native(value) => Ok(value),
        FlagValue::Literal(literal) => parse_flag(&literal).map_err(serde::de::Error::custom),
    }
}
