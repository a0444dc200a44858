use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::books::domain::filter::BookFilter;
use crate::books::domain::model::{sort_books, BookEntity};
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult, PageRequest, PaginatedResult};
use crate::core::repository::Repository;

#[derive(Debug, Default)]
struct Shelf {
    // insertion order
    books: Vec<BookEntity>,
    // isbn -> book id
    isbns: HashMap<String, String>,
}

// MemoryBookRepository keeps books in process, used by tests and local runs
#[derive(Debug, Default)]
pub struct MemoryBookRepository {
    shelf: RwLock<Shelf>,
}

impl MemoryBookRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn save(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let mut shelf = self.shelf.write().await;
        match entity.id.as_deref() {
            None => {
                if shelf.isbns.contains_key(entity.isbn.as_str()) {
                    return Err(LibraryError::duplicate_key(
                        format!("isbn {} is already stored", entity.isbn).as_str()));
                }
                let id = Uuid::new_v4().to_string();
                let saved = entity.clone().with_id(id.as_str());
                shelf.isbns.insert(saved.isbn.clone(), id);
                shelf.books.push(saved.clone());
                debug!("inserted book {:?}", saved.id);
                Ok(saved)
            }
            Some(id) => {
                let stored = shelf.books.iter_mut()
                    .find(|b| b.id.as_deref() == Some(id))
                    .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))?;
                stored.title = entity.title.to_string();
                stored.author = entity.author.to_string();
                Ok(stored.clone())
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> LibraryResult<Option<BookEntity>> {
        let shelf = self.shelf.read().await;
        Ok(shelf.books.iter().find(|b| b.id.as_deref() == Some(id)).cloned())
    }

    async fn delete(&self, entity: &BookEntity) -> LibraryResult<()> {
        let id = entity.id.as_deref()
            .ok_or_else(|| LibraryError::invalid_argument("Book id can't be null"))?;
        let mut shelf = self.shelf.write().await;
        if let Some(pos) = shelf.books.iter().position(|b| b.id.as_deref() == Some(id)) {
            let removed = shelf.books.remove(pos);
            shelf.isbns.remove(removed.isbn.as_str());
        }
        Ok(())
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn exists_by_isbn(&self, isbn: &str) -> LibraryResult<bool> {
        Ok(self.shelf.read().await.isbns.contains_key(isbn))
    }

    async fn find(&self, filter: &BookFilter,
                  page_request: &PageRequest) -> LibraryResult<PaginatedResult<BookEntity>> {
        let mut matches: Vec<BookEntity> = self.shelf.read().await.books.iter()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect();
        sort_books(&mut matches, page_request.sort.as_ref());
        Ok(PaginatedResult::from_matches(matches, page_request))
    }
}
