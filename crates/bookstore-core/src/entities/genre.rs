//! Genre entity - a soft-deletable book category keyed by name

use chrono::{DateTime, Utc};

use crate::lifecycle::SoftDeletable;

/// Genre entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Genre {
    /// Check whether the genre is visible to reads
    #[inline]
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Rename the genre
    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Bring a deleted genre back under the given name
    pub fn restore(&mut self, name: String) {
        self.name = name;
        self.deleted_at = None;
        self.updated_at = Utc::now();
    }

    /// Mark the genre as deleted
    pub fn mark_deleted(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}

impl SoftDeletable for Genre {
    fn id(&self) -> i64 {
        self.id
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}
