use async_trait::async_trait;
use std::env;
use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // inserts an entity without id and assigns one, otherwise updates it by id
    async fn save(&self, entity: &Entity) -> LibraryResult<Entity>;

    // get an entity
    async fn find_by_id(&self, id: &str) -> LibraryResult<Option<Entity>>;

    // delete an entity by its id
    async fn delete(&self, entity: &Entity) -> LibraryResult<()>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub(crate) enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    InMemory,
}

impl From<String> for RepositoryStore {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "dynamodb" | "ddb" => RepositoryStore::DynamoDB,
            "local" | "local-dynamodb" | "localdynamodb" => RepositoryStore::LocalDynamoDB,
            _ => RepositoryStore::InMemory,
        }
    }
}

impl RepositoryStore {
    // reads LIBRARY_STORE, falling back to the given store when unset
    pub fn from_env(default_store: RepositoryStore) -> Self {
        env::var("LIBRARY_STORE").map(RepositoryStore::from).unwrap_or(default_store)
    }
}
