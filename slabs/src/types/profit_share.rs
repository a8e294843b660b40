use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Level, Slab, SlabRecord, SlabTerms, ValueType};
use crate::error::{Result, SlabError};

/// Monthly profit share row. Carries a commission percentage next to the
/// profit share value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitShareRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub level: Option<Level>,
    #[serde(with = "rust_decimal::serde::float")]
    pub from_amount: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub to_amount: Option<Decimal>,
    pub profit_share_type: ValueType,
    #[serde(with = "rust_decimal::serde::float")]
    pub profit_share_value: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub commission_percentage: Option<Decimal>,
}

impl SlabRecord for ProfitShareRecord {
    fn into_slab(self) -> Result<Slab> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SlabError::MalformedRecord("profit share record without _id".into()))?;
        let level = self.level.ok_or_else(|| {
            SlabError::MalformedRecord(format!("profit share record {id} without level"))
        })?;
        Ok(Slab {
            id,
            level: Some(level),
            from_amount: self.from_amount,
            to_amount: self.to_amount,
            value_type: self.profit_share_type,
            value: self.profit_share_value,
            commission_percentage: self.commission_percentage,
        })
    }

    fn from_slab(slab: &Slab) -> Self {
        Self {
            id: Some(slab.id.clone()),
            ..Self::from_terms(&slab.terms())
        }
    }

    fn from_terms(terms: &SlabTerms) -> Self {
        Self {
            id: None,
            level: terms.level,
            from_amount: terms.from_amount,
            to_amount: terms.to_amount,
            profit_share_type: terms.value_type,
            profit_share_value: terms.value,
            commission_percentage: terms.commission_percentage,
        }
    }
}
