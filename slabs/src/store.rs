use tracing::debug;

use crate::error::{Result, SlabError};
use crate::types::{Level, Slab, SlabTerms};

/// System of record for one slab table.
///
/// Implementations own identity assignment. Callers validate before
/// `create`/`update` and re-read with `list` after every mutation.
pub trait SlabStore {
    /// All slabs, or only those at `level` when given.
    fn list(&self, level: Option<Level>) -> Result<Vec<Slab>>;

    /// Persist new terms and return the stored slab with its id.
    fn create(&mut self, terms: SlabTerms) -> Result<Slab>;

    /// Replace the terms of slab `id`.
    fn update(&mut self, id: &str, terms: SlabTerms) -> Result<Slab>;

    /// Remove slab `id` outright.
    fn delete(&mut self, id: &str) -> Result<()>;
}

/// In-memory store, preserving insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slabs: Vec<Slab>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with already-persisted slabs.
    ///
    /// # Errors
    ///
    /// Returns `SlabError::DuplicateId` if two slabs share an id.
    pub fn with_slabs(slabs: Vec<Slab>) -> Result<Self> {
        for (i, slab) in slabs.iter().enumerate() {
            if slabs[..i].iter().any(|s| s.id == slab.id) {
                return Err(SlabError::DuplicateId(slab.id.clone()));
            }
        }
        Ok(Self { slabs, next_id: 0 })
    }

    pub fn into_slabs(self) -> Vec<Slab> {
        self.slabs
    }

    fn allocate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let id = format!("slab-{}", self.next_id);
            if !self.slabs.iter().any(|s| s.id == id) {
                return id;
            }
        }
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.slabs
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| SlabError::NotFound(id.to_string()))
    }
}

impl SlabStore for MemoryStore {
    fn list(&self, level: Option<Level>) -> Result<Vec<Slab>> {
        Ok(self
            .slabs
            .iter()
            .filter(|s| level.is_none() || s.level == level)
            .cloned()
            .collect())
    }

    fn create(&mut self, terms: SlabTerms) -> Result<Slab> {
        let id = self.allocate_id();
        let slab = Slab::from_terms(id, terms);
        debug!(id = %slab.id, bounds = %slab.bounds(), "memory store: created");
        self.slabs.push(slab.clone());
        Ok(slab)
    }

    fn update(&mut self, id: &str, terms: SlabTerms) -> Result<Slab> {
        let idx = self.position(id)?;
        let slab = Slab::from_terms(id, terms);
        self.slabs[idx] = slab.clone();
        debug!(id, bounds = %slab.bounds(), "memory store: updated");
        Ok(slab)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let idx = self.position(id)?;
        self.slabs.remove(idx);
        debug!(id, "memory store: deleted");
        Ok(())
    }
}
