use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Bounds, ValueType};

/// Opaque identity assigned by the store.
pub type SlabId = String;

/// Referral level used to scope tiered tables.
pub type Level = u8;

/// A persisted amount-range slab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slab {
    pub id: SlabId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    pub from_amount: Decimal,
    #[serde(default)]
    pub to_amount: Option<Decimal>,
    pub value_type: ValueType,
    pub value: Decimal,
    /// Second magnitude carried by profit-share slabs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_percentage: Option<Decimal>,
}

impl Slab {
    pub fn from_terms(id: impl Into<SlabId>, terms: SlabTerms) -> Self {
        Self {
            id: id.into(),
            level: terms.level,
            from_amount: terms.from_amount,
            to_amount: terms.to_amount,
            value_type: terms.value_type,
            value: terms.value,
            commission_percentage: terms.commission_percentage,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.from_amount, self.to_amount)
    }

    pub fn terms(&self) -> SlabTerms {
        SlabTerms {
            level: self.level,
            from_amount: self.from_amount,
            to_amount: self.to_amount,
            value_type: self.value_type,
            value: self.value,
            commission_percentage: self.commission_percentage,
        }
    }

    /// Charge this slab applies to `amount`.
    ///
    /// Flat slabs return their value unchanged; percent slabs return
    /// `amount * value / 100`. `None` when the product overflows.
    pub fn charge(&self, amount: Decimal) -> Option<Decimal> {
        match self.value_type {
            ValueType::Flat => Some(self.value),
            ValueType::Percent => amount
                .checked_mul(self.value)?
                .checked_div(Decimal::ONE_HUNDRED)
                .map(|c| c.normalize()),
        }
    }
}

/// The validated, id-less content of a slab, ready to hand to a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabTerms {
    pub level: Option<Level>,
    pub from_amount: Decimal,
    pub to_amount: Option<Decimal>,
    pub value_type: ValueType,
    pub value: Decimal,
    pub commission_percentage: Option<Decimal>,
}

impl SlabTerms {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.from_amount, self.to_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn slab(value_type: ValueType, value: Decimal) -> Slab {
        Slab {
            id: "s1".into(),
            level: None,
            from_amount: dec!(0),
            to_amount: Some(dec!(1000)),
            value_type,
            value,
            commission_percentage: None,
        }
    }

    #[test]
    fn test_charge_flat_ignores_amount() {
        let s = slab(ValueType::Flat, dec!(5));
        assert_eq!(s.charge(dec!(10)), Some(dec!(5)));
        assert_eq!(s.charge(Decimal::MAX), Some(dec!(5)));
    }

    #[test]
    fn test_charge_percent() {
        let s = slab(ValueType::Percent, dec!(2.5));
        assert_eq!(s.charge(dec!(400)), Some(dec!(10)));
        assert_eq!(s.charge(dec!(0)), Some(dec!(0)));
    }

    #[test]
    fn test_charge_percent_overflow_is_none() {
        let s = slab(ValueType::Percent, dec!(50));
        assert_eq!(s.charge(Decimal::MAX), None);
    }

    #[test]
    fn test_terms_round_trip_through_slab() {
        let s = slab(ValueType::Percent, dec!(3));
        let rebuilt = Slab::from_terms("s1", s.terms());
        assert_eq!(rebuilt, s);
    }

    #[test]
    fn test_deserialize_open_ended_without_to_amount() {
        let json = r#"{"id":"a","from_amount":300,"value_type":"flat","value":1}"#;
        let s: Slab = serde_json::from_str(json).unwrap();
        assert_eq!(s.to_amount, None);
        assert_eq!(s.level, None);
    }
}
