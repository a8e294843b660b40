use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Level, Slab, SlabRecord, SlabTerms, ValueType};
use crate::error::{Result, SlabError};

fn default_active() -> bool {
    true
}

/// Level-scoped commission row (referral bonus, level commission).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub level: Option<Level>,
    #[serde(with = "rust_decimal::serde::float")]
    pub from_amount: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub to_amount: Option<Decimal>,
    pub commission_type: ValueType,
    #[serde(with = "rust_decimal::serde::float")]
    pub commission_value: Decimal,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// `data` payload of the referral bonus list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusList {
    pub bonuses: Vec<CommissionRecord>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// `data` payload of the level commission list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionList {
    pub commissions: Vec<CommissionRecord>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl SlabRecord for CommissionRecord {
    fn into_slab(self) -> Result<Slab> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SlabError::MalformedRecord("commission record without _id".into()))?;
        let level = self.level.ok_or_else(|| {
            SlabError::MalformedRecord(format!("commission record {id} without level"))
        })?;
        Ok(Slab {
            id,
            level: Some(level),
            from_amount: self.from_amount,
            to_amount: self.to_amount,
            value_type: self.commission_type,
            value: self.commission_value,
            commission_percentage: None,
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
            commission_type: terms.value_type,
            commission_value: terms.value,
            is_active: true,
        }
    }
}
