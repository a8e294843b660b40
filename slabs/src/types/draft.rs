use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Level, Slab, ValueType};
use crate::validator::Rejection;

/// Raw text as entered in an admin form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub level: String,
    pub from_amount: String,
    pub to_amount: String,
    pub value_type: String,
    pub value: String,
    pub commission_percentage: String,
}

/// A candidate slab before validation. Required fields may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabDraft {
    #[serde(default)]
    pub level: Option<Level>,
    #[serde(default)]
    pub from_amount: Option<Decimal>,
    #[serde(default)]
    pub to_amount: Option<Decimal>,
    #[serde(default)]
    pub value_type: ValueType,
    #[serde(default)]
    pub value: Option<Decimal>,
    #[serde(default)]
    pub commission_percentage: Option<Decimal>,
}

impl SlabDraft {
    pub fn new(
        from_amount: Decimal,
        to_amount: Option<Decimal>,
        value_type: ValueType,
        value: Decimal,
    ) -> Self {
        Self {
            level: None,
            from_amount: Some(from_amount),
            to_amount,
            value_type,
            value: Some(value),
            commission_percentage: None,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_commission_percentage(mut self, pct: Decimal) -> Self {
        self.commission_percentage = Some(pct);
        self
    }

    /// Parse form text into a draft.
    ///
    /// Blank `to_amount` means open-ended. Blank optional fields stay absent.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::MissingFields`] naming every required field that is
    /// blank or not a number. Otherwise returns [`Rejection::InvalidFields`]
    /// naming every supplied optional field that does not parse.
    pub fn parse(input: &FormInput) -> Result<Self, Rejection> {
        let mut missing = Vec::new();
        let mut invalid = Vec::new();

        let level = optional::<Level>(&input.level, "level", &mut invalid);
        let from_amount = required::<Decimal>(&input.from_amount, "from_amount", &mut missing);
        let to_amount = optional::<Decimal>(&input.to_amount, "to_amount", &mut invalid);
        let value = required::<Decimal>(&input.value, "value", &mut missing);
        let commission_percentage = optional::<Decimal>(
            &input.commission_percentage,
            "commission_percentage",
            &mut invalid,
        );
        let value_type = if input.value_type.trim().is_empty() {
            ValueType::default()
        } else {
            input.value_type.parse().unwrap_or_else(|_| {
                invalid.push("value_type");
                ValueType::default()
            })
        };

        if !missing.is_empty() {
            return Err(Rejection::MissingFields(missing));
        }
        if !invalid.is_empty() {
            return Err(Rejection::InvalidFields(invalid));
        }

        Ok(Self {
            level,
            from_amount,
            to_amount,
            value_type,
            value,
            commission_percentage,
        })
    }
}

impl From<&Slab> for SlabDraft {
    fn from(slab: &Slab) -> Self {
        Self {
            level: slab.level,
            from_amount: Some(slab.from_amount),
            to_amount: slab.to_amount,
            value_type: slab.value_type,
            value: Some(slab.value),
            commission_percentage: slab.commission_percentage,
        }
    }
}

fn required<T: FromStr>(raw: &str, field: &'static str, bad: &mut Vec<&'static str>) -> Option<T> {
    let raw = raw.trim();
    match raw.parse::<T>() {
        Ok(v) if !raw.is_empty() => Some(v),
        _ => {
            bad.push(field);
            None
        }
    }
}

fn optional<T: FromStr>(raw: &str, field: &'static str, bad: &mut Vec<&'static str>) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            bad.push(field);
            None
        }
    }
}
