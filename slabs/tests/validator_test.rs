//! Behavioural tests for slab validation against realistic snapshots.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use slabs::{
    validate, FormInput, Level, Rejection, Slab, SlabDraft, SlabTable, ValidationPolicy,
    ValueType, Verdict,
};

fn slab(id: &str, level: Option<Level>, from: Decimal, to: Option<Decimal>) -> Slab {
    Slab {
        id: id.into(),
        level,
        from_amount: from,
        to_amount: to,
        value_type: ValueType::Flat,
        value: dec!(5),
        commission_percentage: None,
    }
}

fn flat(from: Decimal, to: Option<Decimal>) -> SlabDraft {
    SlabDraft::new(from, to, ValueType::Flat, dec!(1))
}

// ---------------------------------------------------------------------------
// Boundary convention
// ---------------------------------------------------------------------------

#[test]
fn test_adjacent_upper_neighbour_is_not_a_conflict() {
    let existing = vec![slab("a", None, dec!(200), Some(dec!(300)))];
    let result = validate(&flat(dec!(100), Some(dec!(200))), &existing, None, &ValidationPolicy::default());
    assert!(result.is_ok());
}

#[test]
fn test_adjacent_lower_neighbour_is_not_a_conflict() {
    let existing = vec![slab("a", None, dec!(0), Some(dec!(100)))];
    let result = validate(&flat(dec!(100), Some(dec!(200))), &existing, None, &ValidationPolicy::default());
    assert!(result.is_ok());
}

#[test]
fn test_partial_overlap_is_rejected() {
    let existing = vec![slab("a", None, dec!(150), Some(dec!(250)))];
    let err = validate(&flat(dec!(100), Some(dec!(200))), &existing, None, &ValidationPolicy::default())
        .unwrap_err();
    assert_eq!(err.code(), "overlap");
}

#[test]
fn test_below_open_tail_is_accepted() {
    let existing = vec![slab("tail", None, dec!(300), None)];
    let result = validate(&flat(dec!(250), Some(dec!(280))), &existing, None, &ValidationPolicy::default());
    assert!(result.is_ok());
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_level_three_candidate_inside_first_slab() {
    let existing = vec![
        slab("l3-a", Some(3), dec!(0), Some(dec!(1000))),
        slab("l3-b", Some(3), dec!(1000), None),
    ];
    let candidate = flat(dec!(500), Some(dec!(800))).with_level(3);
    let policy = SlabTable::LevelCommission.default_policy();

    let err = validate(&candidate, &existing, None, &policy).unwrap_err();
    match err {
        Rejection::Overlap { id, existing, candidate } => {
            assert_eq!(id, "l3-a");
            assert_eq!(existing.from, dec!(0));
            assert_eq!(existing.to, Some(dec!(1000)));
            assert_eq!(candidate.to_string(), "[500, 800)");
        }
        other => panic!("expected overlap, got {other:?}"),
    }
}

#[test]
fn test_flat_table_open_percent_tail_after_flat_slab() {
    let existing = vec![slab("f1", None, dec!(0), Some(dec!(100)))];
    let candidate = SlabDraft::new(dec!(100), None, ValueType::Percent, dec!(3));
    let policy = SlabTable::ActivationFee.default_policy();
    let terms = validate(&candidate, &existing, None, &policy).unwrap();
    assert_eq!(terms.value_type, ValueType::Percent);
    assert_eq!(terms.to_amount, None);
}

#[test]
fn test_same_range_on_another_level_is_independent() {
    let existing = vec![slab("l1", Some(1), dec!(0), None)];
    let candidate = flat(dec!(0), None).with_level(2);
    let policy = SlabTable::ReferralBonus.default_policy();
    assert!(validate(&candidate, &existing, None, &policy).is_ok());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn test_non_intersecting_candidates_are_always_accepted() {
    let existing = vec![
        slab("a", None, dec!(0), Some(dec!(100))),
        slab("b", None, dec!(250), Some(dec!(400))),
        slab("c", None, dec!(1000), None),
    ];
    let policy = ValidationPolicy::default();
    let gaps = [
        (dec!(100), Some(dec!(250))),
        (dec!(100), Some(dec!(101))),
        (dec!(400), Some(dec!(1000))),
        (dec!(999.5), Some(dec!(1000))),
    ];
    for (from, to) in gaps {
        assert!(
            validate(&flat(from, to), &existing, None, &policy).is_ok(),
            "expected [{from}, {to:?}) to be accepted"
        );
    }
}

#[test]
fn test_inverted_or_empty_ranges_are_rejected() {
    let policy = ValidationPolicy::default();
    for (from, to) in [(dec!(10), dec!(10)), (dec!(10), dec!(9.99)), (dec!(0), dec!(0))] {
        let err = validate(&flat(from, Some(to)), &[], None, &policy).unwrap_err();
        assert_eq!(err, Rejection::RangeOrder { from, to });
    }
}

#[test]
fn test_negative_inputs_are_rejected() {
    let policy = ValidationPolicy::default();
    let cases = [
        SlabDraft::new(dec!(-0.01), None, ValueType::Flat, dec!(1)),
        SlabDraft::new(dec!(0), None, ValueType::Flat, dec!(-1)),
        SlabDraft::new(dec!(0), None, ValueType::Percent, dec!(-1)),
    ];
    for d in cases {
        assert_eq!(validate(&d, &[], None, &policy), Err(Rejection::Negative));
    }
}

#[test]
fn test_percent_above_hundred_is_rejected() {
    let d = SlabDraft::new(dec!(0), Some(dec!(10)), ValueType::Percent, dec!(101));
    let err = validate(&d, &[], None, &ValidationPolicy::default()).unwrap_err();
    assert_eq!(err.code(), "percent_exceeded");
}

#[test]
fn test_validation_is_idempotent() {
    let existing = vec![
        slab("a", None, dec!(0), Some(dec!(100))),
        slab("b", None, dec!(100), Some(dec!(200))),
    ];
    let policy = ValidationPolicy::default();
    for candidate in [flat(dec!(50), Some(dec!(150))), flat(dec!(200), None)] {
        let first = validate(&candidate, &existing, None, &policy);
        let second = validate(&candidate, &existing, None, &policy);
        assert_eq!(first, second);
    }
}

#[test]
fn test_editing_identical_range_excludes_self() {
    let existing = vec![slab("a", Some(5), dec!(100), Some(dec!(200)))];
    let policy = SlabTable::LevelCommission.default_policy();
    let candidate = flat(dec!(100), Some(dec!(200))).with_level(5);

    assert!(validate(&candidate, &existing, Some("a"), &policy).is_ok());
    assert_eq!(
        validate(&candidate, &existing, None, &policy).unwrap_err().code(),
        "overlap"
    );
}

#[test]
fn test_snapshot_order_does_not_change_the_decision() {
    let mut existing = vec![
        slab("a", None, dec!(0), Some(dec!(100))),
        slab("b", None, dec!(300), None),
        slab("c", None, dec!(100), Some(dec!(200))),
    ];
    let policy = ValidationPolicy::default();
    let ok = flat(dec!(200), Some(dec!(300)));
    let bad = flat(dec!(150), Some(dec!(350)));

    for _ in 0..existing.len() {
        existing.rotate_left(1);
        assert!(validate(&ok, &existing, None, &policy).is_ok());
        assert!(validate(&bad, &existing, None, &policy).is_err());
    }
}

// ---------------------------------------------------------------------------
// Form input to verdict
// ---------------------------------------------------------------------------

#[test]
fn test_form_to_verdict() {
    let existing = vec![slab("a", None, dec!(0), Some(dec!(100)))];
    let policy = SlabTable::WithdrawalCharge.default_policy();

    let form = FormInput {
        from_amount: "100".into(),
        to_amount: "".into(),
        value_type: "percent".into(),
        value: "1.5".into(),
        ..Default::default()
    };
    let draft = SlabDraft::parse(&form).unwrap();
    let verdict = Verdict::from(&validate(&draft, &existing, None, &policy));
    assert_eq!(verdict, Verdict::accepted());

    let blank = FormInput::default();
    let rejection = SlabDraft::parse(&blank).unwrap_err();
    let verdict = Verdict::rejected(&rejection);
    assert!(!verdict.valid);
    assert_eq!(
        verdict.reason.as_deref(),
        Some("missing required fields: from_amount, value")
    );
}

#[test]
fn test_strict_tail_is_opt_in_per_policy() {
    let existing = vec![slab("a", None, dec!(0), Some(dec!(100)))];
    let candidate = flat(dec!(100), Some(dec!(200)));
    let table = SlabTable::TransferFee;

    assert!(validate(&candidate, &existing, None, &table.default_policy()).is_ok());
    let strict = table.default_policy().with_strict_tail(true);
    assert_eq!(
        validate(&candidate, &existing, None, &strict),
        Err(Rejection::TailOrder { last_to: dec!(100) })
    );
}
