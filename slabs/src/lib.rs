//! Tiered amount-range slabs: types, validation, lookup and persistence
//! seams for fee and commission tables.

pub mod audit;
pub mod editor;
pub mod error;
pub mod lookup;
pub mod policy;
pub mod store;
pub mod table;
pub mod types;
pub mod validator;

// ---- Top-level re-exports for ergonomic usage ----

pub use error::{Result, SlabError};

// Core types
pub use types::{Bounds, FormInput, Level, Slab, SlabDraft, SlabId, SlabTerms, ValueType};

// Validation
pub use policy::{ScopeRule, ValidationPolicy};
pub use validator::{validate, Rejection, Verdict};

// Tables + wire records
pub use table::{SlabTable, MAX_LEVEL, MIN_LEVEL};
pub use types::{ApiResponse, CommissionRecord, FeeRecord, ProfitShareRecord, SlabRecord};

// Lookup + audit
pub use audit::{audit, AuditFinding};
pub use lookup::{find_applicable, find_slab, quote};

// Persistence
pub use editor::{SlabEditor, SubmitError};
pub use store::{MemoryStore, SlabStore};
