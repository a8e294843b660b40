//! Validation policy: how slabs are grouped into scopes and which optional
//! strictness rules apply.

use crate::types::Level;

/// How a table groups its slabs for overlap checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeRule {
    /// Flat table: levels are ignored and every slab shares one scope.
    Unscoped,
    /// Slabs compare only against slabs carrying the same (possibly absent)
    /// level.
    Keyed,
    /// Level is required and must fall within `min..=max`.
    Level { min: Level, max: Level },
}

/// Tuneable rules for [`crate::validate`].
///
/// Use [`Default::default()`] for the keyed, non-strict behaviour or
/// [`crate::SlabTable::default_policy`] for a specific table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Scope grouping for overlap checks.
    pub scope: ScopeRule,
    /// Require new slabs to start strictly after the upper bound of the last
    /// slab in scope. Never applied to edits.
    pub strict_tail: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            scope: ScopeRule::Keyed,
            strict_tail: false,
        }
    }
}

impl ValidationPolicy {
    pub fn unscoped() -> Self {
        Self {
            scope: ScopeRule::Unscoped,
            ..Default::default()
        }
    }

    pub fn levels(min: Level, max: Level) -> Self {
        Self {
            scope: ScopeRule::Level { min, max },
            ..Default::default()
        }
    }

    pub fn with_strict_tail(mut self, strict_tail: bool) -> Self {
        self.strict_tail = strict_tail;
        self
    }

    /// Whether a slab at `level` shares a scope with a candidate at
    /// `candidate_level`.
    pub fn same_scope(&self, candidate_level: Option<Level>, level: Option<Level>) -> bool {
        match self.scope {
            ScopeRule::Unscoped => true,
            ScopeRule::Keyed | ScopeRule::Level { .. } => candidate_level == level,
        }
    }
}
