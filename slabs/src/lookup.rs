use rust_decimal::Decimal;

use crate::error::{Result, SlabError};
use crate::policy::ValidationPolicy;
use crate::types::{Level, Slab};

/// Find a slab by its id.
pub fn find_slab<'a>(slabs: &'a [Slab], id: &str) -> Result<&'a Slab> {
    slabs
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| SlabError::NotFound(id.to_string()))
}

/// The slab whose `[from, to)` range contains `amount` in the scope of `level`.
///
/// Scoping follows `policy`, so a level passed for an unscoped table is
/// ignored. With a consistent snapshot at most one slab matches; otherwise the
/// first match in slice order wins.
pub fn find_applicable<'a>(
    slabs: &'a [Slab],
    policy: &ValidationPolicy,
    level: Option<Level>,
    amount: Decimal,
) -> Option<&'a Slab> {
    slabs
        .iter()
        .find(|s| policy.same_scope(level, s.level) && s.bounds().contains(amount))
}

/// Applicable slab for `amount` paired with its charge, or `None` when no slab
/// applies.
///
/// # Errors
///
/// Returns `SlabError::ChargeOverflow` when the charge does not fit in a
/// `Decimal`.
pub fn quote<'a>(
    slabs: &'a [Slab],
    policy: &ValidationPolicy,
    level: Option<Level>,
    amount: Decimal,
) -> Result<Option<(&'a Slab, Decimal)>> {
    let Some(slab) = find_applicable(slabs, policy, level, amount) else {
        return Ok(None);
    };
    let charge = slab.charge(amount).ok_or_else(|| SlabError::ChargeOverflow {
        id: slab.id.clone(),
        amount,
    })?;
    Ok(Some((slab, charge)))
}
