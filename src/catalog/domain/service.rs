use async_trait::async_trait;
use tracing::{debug, info};
use crate::books::domain::filter::BookFilter;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, PageRequest, PaginatedResult};

pub(crate) const DUPLICATE_ISBN_MESSAGE: &str = "This ISBN already exists";
pub(crate) const NULL_ID_MESSAGE: &str = "Book id can't be null";

pub(crate) struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }
}

// The existence check and the write are two round-trips. Two concurrent adds with the
// same isbn can both pass the check, the loser then fails in the store with DuplicateKey.
#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        if self.book_repository.exists_by_isbn(book.isbn.as_str()).await? {
            return Err(LibraryError::duplicate_isbn(DUPLICATE_ISBN_MESSAGE));
        }
        let saved = self.book_repository.save(&BookEntity::from(book)).await?;
        info!("added book {:?} with isbn {}", saved.id, saved.isbn);
        Ok(BookDto::from(&saved))
    }

    async fn remove_book(&self, book: &BookDto) -> LibraryResult<()> {
        if !book.is_persisted() {
            return Err(LibraryError::invalid_argument(NULL_ID_MESSAGE));
        }
        self.book_repository.delete(&BookEntity::from(book)).await?;
        info!("removed book {:?}", book.id);
        Ok(())
    }

    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        if !book.is_persisted() {
            return Err(LibraryError::invalid_argument(NULL_ID_MESSAGE));
        }
        let saved = self.book_repository.save(&BookEntity::from(book)).await?;
        info!("updated book {:?}", saved.id);
        Ok(BookDto::from(&saved))
    }

    async fn find_book_by_id(&self, id: &str) -> LibraryResult<Option<BookDto>> {
        let book = self.book_repository.find_by_id(id).await?;
        debug!("find book by id {} found={}", id, book.is_some());
        Ok(book.as_ref().map(BookDto::from))
    }

    async fn find_books(&self, filter: &BookFilter,
                        page_request: &PageRequest) -> LibraryResult<PaginatedResult<BookDto>> {
        let res = self.book_repository.find(filter, page_request).await?;
        debug!("find books {:?} page {} size {} matched {}",
            filter, page_request.page, page_request.size, res.total_elements);
        Ok(res.map(BookDto::from))
    }
}
