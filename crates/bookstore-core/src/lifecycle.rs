//! Soft-delete lifecycle for uniquely keyed entities (genres by name, books by title)
//!
//! Each key value moves through `absent -> active -> deleted -> active`:
//!
//! - create with an unused key inserts a new row
//! - create with a key held by an active row is a conflict
//! - create with a key held by a deleted row restores that row in place,
//!   keeping its id
//! - update and delete only see active rows; a deleted row reads as not found
//!
//! The functions here only decide. Callers fetch the rows (locked, inside a
//! store transaction) and perform the writes.

use chrono::{DateTime, Utc};

use crate::error::DomainError;

/// Entity that is hidden by a deletion timestamp instead of being removed
pub trait SoftDeletable {
    fn id(&self) -> i64;

    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }
}

/// What a create request turns into once the existing row (if any) is known
#[derive(Debug, Clone, PartialEq)]
pub enum CreatePlan<T> {
    Insert,
    Restore(T),
}

/// How a create request was satisfied. Restores answer 200 instead of 201.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Restored,
}

impl WriteOutcome {
    #[inline]
    pub fn is_restored(self) -> bool {
        matches!(self, Self::Restored)
    }
}

/// Result of a create: the stored entity and whether it was new
#[derive(Debug, Clone, PartialEq)]
pub struct Written<T> {
    pub value: T,
    pub outcome: WriteOutcome,
}

impl<T> Written<T> {
    pub fn created(value: T) -> Self {
        Self {
            value,
            outcome: WriteOutcome::Created,
        }
    }

    pub fn restored(value: T) -> Self {
        Self {
            value,
            outcome: WriteOutcome::Restored,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Written<U> {
        Written {
            value: f(self.value),
            outcome: self.outcome,
        }
    }
}

/// Trim a key and reject it when nothing is left
pub fn normalize_key(field: &str, raw: &str) -> Result<String, DomainError> {
    let key = raw.trim();
    if key.is_empty() {
        return Err(DomainError::ValidationError(format!(
            "{field} must not be empty"
        )));
    }
    Ok(key.to_string())
}

/// Decide between insert and restore for a create request.
///
/// `existing` is the row holding the key in any state.
pub fn plan_create<T: SoftDeletable>(
    existing: Option<T>,
    on_active: impl FnOnce(&T) -> DomainError,
) -> Result<CreatePlan<T>, DomainError> {
    match existing {
        None => Ok(CreatePlan::Insert),
        Some(row) if row.is_deleted() => Ok(CreatePlan::Restore(row)),
        Some(row) => Err(on_active(&row)),
    }
}

/// Return the row if it exists and is not deleted
pub fn require_active<T: SoftDeletable>(
    row: Option<T>,
    on_missing: impl FnOnce() -> DomainError,
) -> Result<T, DomainError> {
    match row {
        Some(row) if !row.is_deleted() => Ok(row),
        _ => Err(on_missing()),
    }
}

/// Check that an update may move row `self_id` onto a key.
///
/// `clash` is any other row holding the key. A deleted holder still blocks the
/// rename, since its key can only come back by restoring it.
pub fn ensure_key_available<T: SoftDeletable>(
    clash: Option<&T>,
    self_id: i64,
    on_active: impl FnOnce() -> DomainError,
    on_deleted: impl FnOnce() -> DomainError,
) -> Result<(), DomainError> {
    match clash {
        Some(row) if row.id() == self_id => Ok(()),
        Some(row) if row.is_deleted() => Err(on_deleted()),
        Some(_) => Err(on_active()),
        None => Ok(()),
    }
}
