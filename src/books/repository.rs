pub mod ddb_book_repository;
pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::filter::BookFilter;
use crate::books::domain::model::BookEntity;
use crate::core::library::{LibraryResult, PageRequest, PaginatedResult};
use crate::core::repository::Repository;

// BookRepository stores books with a unique constraint on isbn. Inserting a book whose
// isbn is already stored fails with DuplicateKey.
#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity> {
    async fn exists_by_isbn(&self, isbn: &str) -> LibraryResult<bool>;

    // matches populated filter fields as case-insensitive substrings and returns the
    // requested page along with the total number of matches
    async fn find(&self, filter: &BookFilter,
                  page_request: &PageRequest) -> LibraryResult<PaginatedResult<BookEntity>>;
}
