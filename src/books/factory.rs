use crate::books::repository::BookRepository;
use crate::books::repository::ddb_book_repository::DDBBookRepository;
use crate::books::repository::memory_book_repository::MemoryBookRepository;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_book_repository(config: &Configuration, store: RepositoryStore) -> Box<dyn BookRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBBookRepository::new(client, config.books_table.as_str(), config.isbn_table.as_str()))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, config.books_table.as_str(), "book_id").await;
            let _ = create_table(&client, config.isbn_table.as_str(), "isbn").await;
            Box::new(DDBBookRepository::new(client, config.books_table.as_str(), config.isbn_table.as_str()))
        }
        RepositoryStore::InMemory => {
            Box::new(MemoryBookRepository::new())
        }
    }
}
