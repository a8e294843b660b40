//! Accept-or-reject decision for a candidate slab against a snapshot of
//! persisted slabs.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. required fields (`from_amount`, `value`, and `level` for level-scoped tables)
//! 2. level range, for level-scoped tables
//! 3. `to_amount > from_amount` when bounded
//! 4. no negative amounts or values
//! 5. percent values within 100
//! 6. no overlap with any slab in the same scope (the edited slab excluded)
//! 7. optional sequential-tail rule for new slabs
//!
//! Ranges are half-open `[from, to)`, so touching slabs are adjacent.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::policy::{ScopeRule, ValidationPolicy};
use crate::types::{Bounds, Level, Slab, SlabDraft, SlabId, SlabTerms, ValueType};

/// Why a candidate slab was refused. `Display` is the user-facing reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("invalid field values: {}", .0.join(", "))]
    InvalidFields(Vec<&'static str>),

    #[error("level must be between {min} and {max} (got {level})")]
    LevelOutOfRange { level: Level, min: Level, max: Level },

    #[error("from must be less than to ({from} >= {to})")]
    RangeOrder { from: Decimal, to: Decimal },

    #[error("values cannot be negative")]
    Negative,

    #[error("percentage cannot exceed 100 (got {value})")]
    PercentExceeded { value: Decimal },

    #[error("range {candidate} overlaps an existing slab {existing} (id {id})")]
    Overlap {
        id: SlabId,
        candidate: Bounds,
        existing: Bounds,
    },

    #[error("new slab must start after the last slab's upper bound ({last_to})")]
    TailOrder { last_to: Decimal },
}

impl Rejection {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::MissingFields(_) => "missing_fields",
            Rejection::InvalidFields(_) => "invalid_fields",
            Rejection::LevelOutOfRange { .. } => "level_out_of_range",
            Rejection::RangeOrder { .. } => "range_order",
            Rejection::Negative => "negative",
            Rejection::PercentExceeded { .. } => "percent_exceeded",
            Rejection::Overlap { .. } => "overlap",
            Rejection::TailOrder { .. } => "tail_order",
        }
    }
}

/// Serializable outcome: `{"valid":true}` or `{"valid":false,"reason":..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Verdict {
    pub fn accepted() -> Self {
        Self {
            valid: true,
            code: None,
            reason: None,
        }
    }

    pub fn rejected(rejection: &Rejection) -> Self {
        Self {
            valid: false,
            code: Some(rejection.code().to_string()),
            reason: Some(rejection.to_string()),
        }
    }
}

impl<T> From<&Result<T, Rejection>> for Verdict {
    fn from(result: &Result<T, Rejection>) -> Self {
        match result {
            Ok(_) => Verdict::accepted(),
            Err(rejection) => Verdict::rejected(rejection),
        }
    }
}

/// Validate `candidate` against `existing`.
///
/// `editing_id` names the slab being replaced; it never conflicts with the
/// candidate and disables the sequential-tail rule.
///
/// # Errors
///
/// Returns the first [`Rejection`] encountered. Overlaps name the first
/// conflicting slab in `existing` order.
pub fn validate(
    candidate: &SlabDraft,
    existing: &[Slab],
    editing_id: Option<&str>,
    policy: &ValidationPolicy,
) -> Result<SlabTerms, Rejection> {
    let terms = check_terms(candidate, policy)?;

    let level = terms.level;
    let in_scope = move || {
        existing.iter().filter(move |s| {
            editing_id.map_or(true, |id| s.id != id) && policy.same_scope(level, s.level)
        })
    };

    let bounds = terms.bounds();
    if let Some(conflict) = in_scope().find(|s| bounds.overlaps(&s.bounds())) {
        return Err(Rejection::Overlap {
            id: conflict.id.clone(),
            candidate: bounds,
            existing: conflict.bounds(),
        });
    }

    if policy.strict_tail && editing_id.is_none() {
        let last = in_scope().max_by_key(|s| s.from_amount);
        if let Some(last_to) = last.and_then(|s| s.to_amount) {
            if terms.from_amount <= last_to {
                return Err(Rejection::TailOrder { last_to });
            }
        }
    }

    Ok(terms)
}

/// Field-level checks that need no snapshot.
pub(crate) fn check_terms(
    candidate: &SlabDraft,
    policy: &ValidationPolicy,
) -> Result<SlabTerms, Rejection> {
    let mut missing = Vec::new();
    if matches!(policy.scope, ScopeRule::Level { .. }) && candidate.level.is_none() {
        missing.push("level");
    }
    if candidate.from_amount.is_none() {
        missing.push("from_amount");
    }
    if candidate.value.is_none() {
        missing.push("value");
    }
    let (Some(from_amount), Some(value)) = (candidate.from_amount, candidate.value) else {
        return Err(Rejection::MissingFields(missing));
    };
    if !missing.is_empty() {
        return Err(Rejection::MissingFields(missing));
    }

    let level = match policy.scope {
        ScopeRule::Unscoped => None,
        ScopeRule::Keyed => candidate.level,
        ScopeRule::Level { min, max } => {
            let level = candidate.level.unwrap_or_default();
            if !(min..=max).contains(&level) {
                return Err(Rejection::LevelOutOfRange { level, min, max });
            }
            Some(level)
        }
    };

    if let Some(to) = candidate.to_amount {
        if to <= from_amount {
            return Err(Rejection::RangeOrder {
                from: from_amount,
                to,
            });
        }
    }

    let commission = candidate.commission_percentage;
    if from_amount < Decimal::ZERO
        || value < Decimal::ZERO
        || commission.is_some_and(|c| c < Decimal::ZERO)
    {
        return Err(Rejection::Negative);
    }

    if candidate.value_type == ValueType::Percent {
        for pct in std::iter::once(value).chain(commission) {
            if pct > Decimal::ONE_HUNDRED {
                return Err(Rejection::PercentExceeded { value: pct });
            }
        }
    }

    Ok(SlabTerms {
        level,
        from_amount,
        to_amount: candidate.to_amount,
        value_type: candidate.value_type,
        value,
        commission_percentage: commission,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn slab(id: &str, from: Decimal, to: Option<Decimal>) -> Slab {
        Slab {
            id: id.into(),
            level: None,
            from_amount: from,
            to_amount: to,
            value_type: ValueType::Flat,
            value: dec!(1),
            commission_percentage: None,
        }
    }

    fn draft(from: Decimal, to: Option<Decimal>) -> SlabDraft {
        SlabDraft::new(from, to, ValueType::Flat, dec!(1))
    }

    fn lenient() -> ValidationPolicy {
        ValidationPolicy::default()
    }

    // ---- field checks ----

    #[test]
    fn test_missing_from_and_value() {
        let d = SlabDraft::default();
        let err = validate(&d, &[], None, &lenient()).unwrap_err();
        assert_eq!(err, Rejection::MissingFields(vec!["from_amount", "value"]));
        assert!(err.to_string().starts_with("missing required fields"));
    }

    #[test]
    fn test_missing_level_on_level_scoped_table() {
        let d = draft(dec!(0), Some(dec!(10)));
        let err = validate(&d, &[], None, &ValidationPolicy::levels(1, 15)).unwrap_err();
        assert_eq!(err, Rejection::MissingFields(vec!["level"]));
    }

    #[test]
    fn test_level_out_of_range() {
        let policy = ValidationPolicy::levels(1, 15);
        for level in [0, 16] {
            let d = draft(dec!(0), Some(dec!(10))).with_level(level);
            let err = validate(&d, &[], None, &policy).unwrap_err();
            assert_eq!(err, Rejection::LevelOutOfRange { level, min: 1, max: 15 });
        }
        let ok = draft(dec!(0), Some(dec!(10))).with_level(15);
        assert!(validate(&ok, &[], None, &policy).is_ok());
    }

    #[test]
    fn test_to_must_exceed_from() {
        for to in [dec!(100), dec!(50)] {
            let err = validate(&draft(dec!(100), Some(to)), &[], None, &lenient()).unwrap_err();
            assert_eq!(err.code(), "range_order");
            assert!(err.to_string().starts_with("from must be less than to"));
        }
    }

    #[test]
    fn test_negative_values() {
        let neg_from = draft(dec!(-1), Some(dec!(10)));
        assert_eq!(validate(&neg_from, &[], None, &lenient()), Err(Rejection::Negative));

        let neg_value = SlabDraft::new(dec!(0), None, ValueType::Flat, dec!(-0.01));
        assert_eq!(validate(&neg_value, &[], None, &lenient()), Err(Rejection::Negative));

        let neg_commission = draft(dec!(0), None).with_commission_percentage(dec!(-5));
        assert_eq!(validate(&neg_commission, &[], None, &lenient()), Err(Rejection::Negative));
    }

    #[test]
    fn test_percent_cap() {
        let over = SlabDraft::new(dec!(0), None, ValueType::Percent, dec!(100.01));
        let err = validate(&over, &[], None, &lenient()).unwrap_err();
        assert_eq!(err, Rejection::PercentExceeded { value: dec!(100.01) });
        assert!(err.to_string().starts_with("percentage cannot exceed 100"));

        let exact = SlabDraft::new(dec!(0), None, ValueType::Percent, dec!(100));
        assert!(validate(&exact, &[], None, &lenient()).is_ok());

        // flat values have no cap
        let flat = SlabDraft::new(dec!(0), None, ValueType::Flat, dec!(250));
        assert!(validate(&flat, &[], None, &lenient()).is_ok());
    }

    #[test]
    fn test_commission_percentage_cap_only_for_percent() {
        let pct = SlabDraft::new(dec!(0), None, ValueType::Percent, dec!(5))
            .with_commission_percentage(dec!(120));
        assert_eq!(
            validate(&pct, &[], None, &lenient()),
            Err(Rejection::PercentExceeded { value: dec!(120) })
        );

        let flat = SlabDraft::new(dec!(0), None, ValueType::Flat, dec!(5))
            .with_commission_percentage(dec!(120));
        assert!(validate(&flat, &[], None, &lenient()).is_ok());
    }

    #[test]
    fn test_ordering_checked_before_negativity() {
        let d = draft(dec!(-1), Some(dec!(-5)));
        assert_eq!(validate(&d, &[], None, &lenient()).unwrap_err().code(), "range_order");
    }

    // ---- overlap ----

    #[test]
    fn test_adjacent_ranges_accepted() {
        let existing = vec![slab("a", dec!(200), Some(dec!(300)))];
        assert!(validate(&draft(dec!(100), Some(dec!(200))), &existing, None, &lenient()).is_ok());
    }

    #[test]
    fn test_overlap_names_conflict() {
        let existing = vec![slab("a", dec!(150), Some(dec!(250)))];
        let err = validate(&draft(dec!(100), Some(dec!(200))), &existing, None, &lenient())
            .unwrap_err();
        match &err {
            Rejection::Overlap { id, existing, .. } => {
                assert_eq!(id, "a");
                assert_eq!(existing.to_string(), "[150, 250)");
            }
            other => panic!("expected overlap, got {other:?}"),
        }
        assert!(err.to_string().contains("overlaps an existing slab [150, 250)"));
    }

    #[test]
    fn test_first_conflict_in_snapshot_order_is_reported() {
        let existing = vec![
            slab("late", dec!(500), Some(dec!(600))),
            slab("early", dec!(0), Some(dec!(100))),
        ];
        let err = validate(&draft(dec!(50), Some(dec!(550))), &existing, None, &lenient())
            .unwrap_err();
        assert!(matches!(err, Rejection::Overlap { ref id, .. } if id == "late"));
    }

    #[test]
    fn test_open_candidate_overlaps_later_slab() {
        let existing = vec![slab("a", dec!(1000), Some(dec!(2000)))];
        let err = validate(&draft(dec!(0), None), &existing, None, &lenient()).unwrap_err();
        assert_eq!(err.code(), "overlap");
    }

    #[test]
    fn test_second_open_tail_rejected() {
        let existing = vec![slab("tail", dec!(1000), None)];
        let err = validate(&draft(dec!(5000), None), &existing, None, &lenient()).unwrap_err();
        assert_eq!(err.code(), "overlap");
    }

    #[test]
    fn test_editing_excludes_self() {
        let existing = vec![
            slab("a", dec!(0), Some(dec!(100))),
            slab("b", dec!(100), Some(dec!(200))),
        ];
        let same = draft(dec!(0), Some(dec!(100)));
        assert!(validate(&same, &existing, Some("a"), &lenient()).is_ok());
        // widening into the neighbour still conflicts
        let wider = draft(dec!(0), Some(dec!(150)));
        let err = validate(&wider, &existing, Some("a"), &lenient()).unwrap_err();
        assert!(matches!(err, Rejection::Overlap { ref id, .. } if id == "b"));
    }

    #[test]
    fn test_scopes_are_independent() {
        let mut other_level = slab("l2", dec!(0), Some(dec!(1000)));
        other_level.level = Some(2);
        let d = draft(dec!(0), Some(dec!(1000))).with_level(3);
        assert!(validate(&d, &[other_level.clone()], None, &ValidationPolicy::levels(1, 15)).is_ok());

        // a flat table ignores levels entirely
        let err = validate(&d, &[other_level], None, &ValidationPolicy::unscoped()).unwrap_err();
        assert_eq!(err.code(), "overlap");
    }

    #[test]
    fn test_unscoped_drops_level_from_terms() {
        let d = draft(dec!(0), None).with_level(4);
        let terms = validate(&d, &[], None, &ValidationPolicy::unscoped()).unwrap();
        assert_eq!(terms.level, None);
    }

    // ---- sequential tail ----

    #[test]
    fn test_strict_tail_requires_start_after_last_bound() {
        let existing = vec![
            slab("a", dec!(0), Some(dec!(100))),
            slab("b", dec!(100), Some(dec!(200))),
        ];
        let strict = lenient().with_strict_tail(true);

        let touching = draft(dec!(200), Some(dec!(300)));
        assert!(validate(&touching, &existing, None, &lenient()).is_ok());
        assert_eq!(
            validate(&touching, &existing, None, &strict),
            Err(Rejection::TailOrder { last_to: dec!(200) })
        );

        let after = draft(dec!(200.01), Some(dec!(300)));
        assert!(validate(&after, &existing, None, &strict).is_ok());
    }

    #[test]
    fn test_strict_tail_skipped_when_editing() {
        let existing = vec![
            slab("a", dec!(0), Some(dec!(100))),
            slab("b", dec!(100), Some(dec!(200))),
        ];
        let strict = lenient().with_strict_tail(true);
        let edit = draft(dec!(0), Some(dec!(50)));
        assert!(validate(&edit, &existing, Some("a"), &strict).is_ok());
    }

    #[test]
    fn test_strict_tail_ignores_open_last_slab() {
        let existing = vec![
            slab("a", dec!(500), Some(dec!(1000))),
            slab("tail", dec!(1000), None),
        ];
        let strict = lenient().with_strict_tail(true);
        assert!(validate(&draft(dec!(0), Some(dec!(500))), &existing, None, &strict).is_ok());
    }

    // ---- verdict ----

    #[test]
    fn test_verdict_json_shape() {
        let ok: Result<(), Rejection> = Ok(());
        assert_eq!(serde_json::to_string(&Verdict::from(&ok)).unwrap(), r#"{"valid":true}"#);

        let bad: Result<(), Rejection> = Err(Rejection::Negative);
        let json = serde_json::to_value(Verdict::from(&bad)).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["code"], "negative");
        assert_eq!(json["reason"], "values cannot be negative");
    }
}
