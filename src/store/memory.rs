use dashmap::DashMap;

use crate::store::{Entity, Repository};

/// Process-lifetime repository backed by a concurrent map
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    items: DashMap<String, T>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Entity + Clone + Send + Sync,
{
    fn get_by_id(&self, id: &str) -> Option<T> {
        self.items.get(id).map(|entry| entry.value().clone())
    }

    fn save(&self, entity: T) -> T {
        self.items.insert(entity.id().to_string(), entity.clone());
        entity
    }
}
