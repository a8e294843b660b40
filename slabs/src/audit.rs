//! Whole-snapshot consistency report.
//!
//! Unlike [`crate::validate`], which stops at the first problem with one
//! candidate, the audit walks every persisted slab and reports every broken
//! invariant so existing data can be repaired.

use std::fmt;

use crate::policy::ValidationPolicy;
use crate::types::{Bounds, Level, Slab, SlabDraft, SlabId};
use crate::validator::{check_terms, Rejection};

/// A single invariant violation in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditFinding {
    /// A slab whose own fields break a range or value rule.
    InvalidSlab { id: SlabId, rejection: Rejection },
    /// Two slabs in the same scope share part of their range.
    Overlap {
        level: Option<Level>,
        first: (SlabId, Bounds),
        second: (SlabId, Bounds),
    },
    /// The same id appears more than once.
    DuplicateId { id: SlabId },
}

impl fmt::Display for AuditFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditFinding::InvalidSlab { id, rejection } => write!(f, "slab {id}: {rejection}"),
            AuditFinding::Overlap {
                level,
                first,
                second,
            } => {
                if let Some(level) = level {
                    write!(f, "level {level}: ")?;
                }
                write!(
                    f,
                    "slab {} {} overlaps slab {} {}",
                    first.0, first.1, second.0, second.1
                )
            }
            AuditFinding::DuplicateId { id } => write!(f, "duplicate slab id {id}"),
        }
    }
}

/// Report every invariant violation in `slabs` under `policy`.
///
/// Findings are ordered by slab position: field problems and duplicates as
/// each slab is reached, then overlapping pairs `(i, j)` with `i < j`.
pub fn audit(slabs: &[Slab], policy: &ValidationPolicy) -> Vec<AuditFinding> {
    let mut findings = Vec::new();

    for (i, slab) in slabs.iter().enumerate() {
        if slabs[..i].iter().any(|s| s.id == slab.id) {
            findings.push(AuditFinding::DuplicateId {
                id: slab.id.clone(),
            });
        }
        if let Err(rejection) = check_terms(&SlabDraft::from(slab), policy) {
            findings.push(AuditFinding::InvalidSlab {
                id: slab.id.clone(),
                rejection,
            });
        }
    }

    for (i, a) in slabs.iter().enumerate() {
        for b in &slabs[i + 1..] {
            if policy.same_scope(a.level, b.level) && a.bounds().overlaps(&b.bounds()) {
                findings.push(AuditFinding::Overlap {
                    level: a.level.filter(|_| b.level == a.level),
                    first: (a.id.clone(), a.bounds()),
                    second: (b.id.clone(), b.bounds()),
                });
            }
        }
    }

    findings
}
