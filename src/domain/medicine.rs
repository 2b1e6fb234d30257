//! Medicine records and the in-memory resource store.
//!
//! The store owns the ordered collection of records. All access goes through
//! a single mutex, so concurrent handlers observe each operation atomically.
//! Nothing here is persisted; the collection resets on every restart.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// A single medicine record.
///
/// Missing payload fields deserialize to their zero values. The `id` carried
/// by a client payload is never trusted: the store overwrites it.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Medicine {
    pub id: i64,
    pub name: String,
    pub manufacturer: String,
    pub price: f64,
    pub stock: i64,
}

impl Medicine {
    // ---
    pub fn new(id: i64, name: &str, manufacturer: &str, price: f64, stock: i64) -> Self {
        // ---
        Self {
            id,
            name: name.to_string(),
            manufacturer: manufacturer.to_string(),
            price,
            stock,
        }
    }
}

/// Failures surfaced by store operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Unparseable identifier or malformed payload.
    #[error("{0}")]
    InvalidArgument(String),

    /// No record carries the requested id.
    #[error("Medicine is not exist.")]
    NotFound(i64),
}

/// Parses a path segment into a medicine id.
///
/// Runs before any store access, so a bad identifier never reaches the lock.
pub fn parse_id(raw: &str) -> Result<i64, StoreError> {
    // ---
    raw.parse::<i64>()
        .map_err(|_| StoreError::InvalidArgument("Unavailable ID".to_string()))
}

struct StoreInner {
    medicines: Vec<Medicine>,
    next_id: i64,
}

/// Mutex-guarded ordered collection of medicine records.
///
/// Ids come from a monotonic generator seeded at `max(id) + 1`, so an id is
/// never handed out twice even after deletions.
pub struct MedicineStore {
    // ---
    inner: Mutex<StoreInner>,
}

/// Type alias for the shared store handle.
pub type StorePtr = Arc<MedicineStore>;

impl MedicineStore {
    // ---
    /// Creates a store holding `medicines` in the given order.
    pub fn with_records(medicines: Vec<Medicine>) -> Self {
        // ---
        let next_id = medicines.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        Self {
            inner: Mutex::new(StoreInner { medicines, next_id }),
        }
    }

    /// Creates a store with no records.
    pub fn empty() -> Self {
        Self::with_records(Vec::new())
    }

    /// Creates the store the service starts with.
    pub fn seeded() -> Self {
        // ---
        Self::with_records(vec![
            Medicine::new(1, "ABC", "1234", 15.5, 100),
            Medicine::new(2, "EFG", "5678", 12.0, 50),
            Medicine::new(3, "XYZ", "9999", 5.8, 200),
        ])
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // No operation can leave the Vec half-updated, so poisoning is ignored.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a snapshot of every record in storage order.
    pub fn list_all(&self) -> Vec<Medicine> {
        self.lock().medicines.clone()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.lock().medicines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().medicines.is_empty()
    }

    /// Looks up the first record with the given id.
    pub fn get_by_id(&self, id: i64) -> Result<Medicine, StoreError> {
        // ---
        self.lock()
            .medicines
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Appends `payload` under a freshly assigned id and returns the stored record.
    pub fn create(&self, payload: Medicine) -> Medicine {
        // ---
        let mut inner = self.lock();

        let created = Medicine {
            id: inner.next_id,
            ..payload
        };
        inner.next_id += 1;
        inner.medicines.push(created.clone());

        tracing::debug!(id = created.id, "medicine created");
        created
    }

    /// Replaces every field of record `id` with `payload`, keeping `id`.
    pub fn update(&self, id: i64, payload: Medicine) -> Result<Medicine, StoreError> {
        // ---
        let mut inner = self.lock();

        let slot = inner
            .medicines
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::NotFound(id))?;

        *slot = Medicine { id, ..payload };
        Ok(slot.clone())
    }

    /// Removes record `id`, preserving the order of the remaining records.
    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        // ---
        let mut inner = self.lock();

        let index = inner
            .medicines
            .iter()
            .position(|m| m.id == id)
            .ok_or(StoreError::NotFound(id))?;

        inner.medicines.remove(index);
        Ok(())
    }
}

impl Default for MedicineStore {
    fn default() -> Self {
        Self::seeded()
    }
}
