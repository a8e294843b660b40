use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Slab, SlabRecord, SlabTerms, ValueType};
use crate::error::{Result, SlabError};

/// Flat fee table row (activation fee, withdrawal charge, wallet transfer fee).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub from_amount: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub to_amount: Option<Decimal>,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl SlabRecord for FeeRecord {
    fn into_slab(self) -> Result<Slab> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SlabError::MalformedRecord("fee record without _id".into()))?;
        Ok(Slab {
            id,
            level: None,
            from_amount: self.from_amount,
            to_amount: self.to_amount,
            value_type: self.value_type,
            value: self.value,
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
            from_amount: terms.from_amount,
            to_amount: terms.to_amount,
            value_type: terms.value_type,
            value: terms.value,
            created_by: None,
            created_at: None,
            updated_at: None,
        }
    }
}
