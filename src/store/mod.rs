//! Typed repositories for the payroll collections.
//!
//! Each collection is stored keyed by a stable ID. Saving an entity whose key
//! already exists replaces it in place, which is how regenerating a payroll
//! for the same employee and period overwrites rather than duplicates.

mod memory;

pub use memory::InMemoryRepository;

use crate::models::{Allowance, Employee, LeaveRequest, PayrollRecord};

/// An entity stored under a stable string key.
pub trait Keyed {
    /// The key this entity is stored under.
    fn key(&self) -> &str;
}

impl Keyed for Employee {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for LeaveRequest {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Allowances are stored one per employee.
impl Keyed for Allowance {
    fn key(&self) -> &str {
        &self.employee_id
    }
}

impl Keyed for PayrollRecord {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Storage for one collection of keyed entities.
pub trait Repository<T: Keyed + Clone> {
    /// Returns the entity stored under `key`, if any.
    fn get(&self, key: &str) -> Option<T>;

    /// Returns every stored entity in insertion order.
    fn list(&self) -> Vec<T>;

    /// Inserts the entity, replacing any existing one with the same key.
    ///
    /// Returns the entity that was replaced.
    fn upsert(&mut self, entity: T) -> Option<T>;

    /// Removes and returns the entity stored under `key`.
    fn delete(&mut self, key: &str) -> Option<T>;

    /// Number of stored entities.
    fn len(&self) -> usize {
        self.list().len()
    }

    /// Whether the repository holds no entities.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
