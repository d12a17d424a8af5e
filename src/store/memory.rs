use super::{Keyed, Repository};

/// A `Vec`-backed repository that keeps insertion order.
///
/// Upserting an existing key replaces the entity at its original position.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    items: Vec<T>,
}

impl<T> InMemoryRepository<T> {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed + Clone> InMemoryRepository<T> {
    /// Creates a repository from existing entities.
    ///
    /// Later entities replace earlier ones with the same key.
    pub fn with_items(items: impl IntoIterator<Item = T>) -> Self {
        let mut repo = Self::new();
        for item in items {
            repo.upsert(item);
        }
        repo
    }

    /// Borrows the stored entities in insertion order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|item| item.key() == key)
    }
}

impl<T: Keyed + Clone> Repository<T> for InMemoryRepository<T> {
    fn get(&self, key: &str) -> Option<T> {
        self.position(key).map(|i| self.items[i].clone())
    }

    fn list(&self) -> Vec<T> {
        self.items.clone()
    }

    fn upsert(&mut self, entity: T) -> Option<T> {
        match self.position(entity.key()) {
            Some(i) => Some(std::mem::replace(&mut self.items[i], entity)),
            None => {
                self.items.push(entity);
                None
            }
        }
    }

    fn delete(&mut self, key: &str) -> Option<T> {
        self.position(key).map(|i| self.items.remove(i))
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Employee;
    use rust_decimal::Decimal;

    fn employee(id: &str, salary: i64) -> Employee {
        Employee {
            id: id.to_string(),
            first_name: "Test".to_string(),
            last_name: id.to_string(),
            department: String::new(),
            position: String::new(),
            base_salary: Decimal::from(salary),
            is_active: true,
        }
    }

    #[test]
    fn test_upsert_inserts_then_replaces_in_place() {
        let mut repo = InMemoryRepository::new();

        assert!(repo.upsert(employee("a", 1)).is_none());
        assert!(repo.upsert(employee("b", 2)).is_none());
        let replaced = repo.upsert(employee("a", 3));

        assert_eq!(replaced.map(|e| e.base_salary), Some(Decimal::from(1)));
        assert_eq!(repo.len(), 2);
        let ids: Vec<String> = repo.list().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(repo.get("a").unwrap().base_salary, Decimal::from(3));
    }

    #[test]
    fn test_delete_removes_only_the_key() {
        let mut repo = InMemoryRepository::with_items(vec![employee("a", 1), employee("b", 2)]);

        assert_eq!(repo.delete("a").map(|e| e.id), Some("a".to_string()));
        assert!(repo.delete("a").is_none());
        assert!(repo.get("a").is_none());
        assert_eq!(repo.as_slice().len(), 1);
    }

    #[test]
    fn test_with_items_deduplicates_by_key() {
        let repo = InMemoryRepository::with_items(vec![
            employee("a", 1),
            employee("a", 2),
            employee("c", 3),
        ]);

        assert_eq!(repo.len(), 2);
        assert_eq!(repo.get("a").unwrap().base_salary, Decimal::from(2));
        assert!(!repo.is_empty());
        assert!(InMemoryRepository::<Employee>::new().is_empty());
    }
}
