pub mod service;

use async_trait::async_trait;
use crate::books::domain::filter::BookFilter;
use crate::books::dto::BookDto;
use crate::core::library::{LibraryResult, PageRequest, PaginatedResult};

#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    // fails with DuplicateIsbn when the isbn is already catalogued
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    // fails with InvalidArgument when the book has no id
    async fn remove_book(&self, book: &BookDto) -> LibraryResult<()>;
    // fails with InvalidArgument when the book has no id
    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    async fn find_book_by_id(&self, id: &str) -> LibraryResult<Option<BookDto>>;
    async fn find_books(&self, filter: &BookFilter,
                        page_request: &PageRequest) -> LibraryResult<PaginatedResult<BookDto>>;
}
