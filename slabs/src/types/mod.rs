mod bounds;
mod commission;
mod draft;
mod enums;
mod envelope;
mod fee;
mod profit_share;
mod slab;

pub use bounds::Bounds;
pub use commission::{BonusList, CommissionList, CommissionRecord};
pub use draft::{FormInput, SlabDraft};
pub use enums::ValueType;
pub use envelope::ApiResponse;
pub use fee::FeeRecord;
pub use profit_share::ProfitShareRecord;
pub use slab::{Level, Slab, SlabId, SlabTerms};

use crate::error::Result;

/// A backend row that maps onto a [`Slab`].
pub trait SlabRecord: Sized {
    /// Convert a fetched row into a slab, rejecting rows missing identity or
    /// scope.
    fn into_slab(self) -> Result<Slab>;

    /// Build the create/update payload for validated terms.
    fn from_terms(terms: &SlabTerms) -> Self;

    /// Rebuild the backend row for a stored slab, id included.
    fn from_slab(slab: &Slab) -> Self;
}
