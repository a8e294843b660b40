//! Form-submission flow: validate against the last fetched snapshot, persist
//! on acceptance, then re-read the store.

use thiserror::Error;
use tracing::{debug, info};

use crate::error::SlabError;
use crate::policy::ValidationPolicy;
use crate::store::SlabStore;
use crate::types::{Slab, SlabDraft, SlabTerms};
use crate::validator::{validate, Rejection};

/// Outcome of a failed submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The draft broke a validation rule; nothing was written.
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// The store refused or failed the write.
    #[error("save failed: {0}")]
    Store(#[from] SlabError),
}

/// Drives create/edit/delete for one table over a [`SlabStore`].
pub struct SlabEditor<S> {
    store: S,
    policy: ValidationPolicy,
    snapshot: Vec<Slab>,
}

impl<S: SlabStore> SlabEditor<S> {
    /// Create an editor and fetch the initial snapshot.
    pub fn new(store: S, policy: ValidationPolicy) -> Result<Self, SlabError> {
        let snapshot = store.list(None)?;
        Ok(Self {
            store,
            policy,
            snapshot,
        })
    }

    /// Slabs as of the last fetch.
    pub fn snapshot(&self) -> &[Slab] {
        &self.snapshot
    }

    /// Re-read the snapshot from the store.
    pub fn refresh(&mut self) -> Result<(), SlabError> {
        self.snapshot = self.store.list(None)?;
        debug!(count = self.snapshot.len(), "snapshot refreshed");
        Ok(())
    }

    /// Validate without writing.
    pub fn check(&self, draft: &SlabDraft, editing_id: Option<&str>) -> Result<SlabTerms, Rejection> {
        validate(draft, &self.snapshot, editing_id, &self.policy)
    }

    /// Validate `draft` and create it, or replace `editing_id` with it.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Rejected`] when validation fails; [`SubmitError::Store`]
    /// when the store write or the follow-up refresh fails.
    pub fn submit(&mut self, draft: &SlabDraft, editing_id: Option<&str>) -> Result<Slab, SubmitError> {
        let terms = self.check(draft, editing_id).map_err(|rejection| {
            debug!(code = rejection.code(), reason = %rejection, "slab rejected");
            rejection
        })?;

        let saved = match editing_id {
            Some(id) => self.store.update(id, terms)?,
            None => self.store.create(terms)?,
        };
        info!(
            id = %saved.id,
            level = ?saved.level,
            bounds = %saved.bounds(),
            edit = editing_id.is_some(),
            "slab saved"
        );

        self.refresh()?;
        Ok(saved)
    }

    /// Delete slab `id` and refresh. Deletion is never validated.
    pub fn remove(&mut self, id: &str) -> Result<(), SlabError> {
        self.store.delete(id)?;
        info!(id, "slab deleted");
        self.refresh()?;
        Ok(())
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
