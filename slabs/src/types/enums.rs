use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SlabError;

/// How a slab's `value` is applied to an amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Fixed amount regardless of the transaction size.
    #[default]
    Flat,
    /// Percentage of the transaction amount, within `[0, 100]`.
    Percent,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Flat => "flat",
            ValueType::Percent => "percent",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = SlabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(ValueType::Flat),
            "percent" => Ok(ValueType::Percent),
            other => Err(SlabError::InvalidValueType(other.to_string())),
        }
    }
}
