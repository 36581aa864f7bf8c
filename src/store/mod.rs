pub mod memory;

pub use memory::InMemoryRepository;

/// A record addressed by an opaque string id
pub trait Entity {
    fn id(&self) -> &str;
}

/// Key-value repository for games and gamers.
///
/// Records are looked up and saved whole; the last save for an id wins.
pub trait Repository<T>: Send + Sync {
    fn get_by_id(&self, id: &str) -> Option<T>;

    /// Store the entity under its id and return the stored record
    fn save(&self, entity: T) -> T;
}
