use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, Delete, Put, ReturnValue, TransactWriteItem};
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::books::domain::filter::BookFilter;
use crate::books::domain::model::{sort_books, BookEntity};
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult, PageRequest, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{contains_filter_expr, is_condition_cancellation, parse_item, parse_string_attribute, service_error};

// position of the isbn put in the insert transaction
const ISBN_ITEM: usize = 1;

// DDBBookRepository keeps books in `table_name` keyed by book_id. Every isbn also owns an
// item in `isbn_table`, which is how the unique constraint on isbn is enforced: both
// items are written and removed in a single transaction.
#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
    isbn_table_name: String,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str, isbn_table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            isbn_table_name: isbn_table_name.to_string(),
        }
    }

    async fn insert(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let saved = entity.clone().with_id(Uuid::new_v4().to_string().as_str());
        let book_id = saved.id.clone().unwrap_or_default();
        let put_book = Put::builder()
            .table_name(self.table_name.as_str())
            .set_item(Some(to_item(&saved)?))
            .condition_expression("attribute_not_exists(book_id)")
            .build();
        let put_isbn = Put::builder()
            .table_name(self.isbn_table_name.as_str())
            .item("isbn", AttributeValue::S(saved.isbn.to_string()))
            .item("book_id", AttributeValue::S(book_id))
            .condition_expression("attribute_not_exists(isbn)")
            .build();

        match self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().put(put_book).build())
            .transact_items(TransactWriteItem::builder().put(put_isbn).build())
            .send()
            .await {
            Ok(_) => {
                debug!("inserted book {:?}", saved.id);
                Ok(saved)
            }
            Err(err) => {
                let duplicate = service_error(&err)
                    .map(|e| is_condition_cancellation(e, ISBN_ITEM)).unwrap_or(false);
                if duplicate {
                    Err(LibraryError::duplicate_key(
                        format!("isbn {} is already stored", saved.isbn).as_str()))
                } else {
                    Err(LibraryError::from(err))
                }
            }
        }
    }

    // isbn and book_id are never rewritten
    async fn update(&self, id: &str, entity: &BookEntity) -> LibraryResult<BookEntity> {
        match self.client
            .update_item()
            .table_name(self.table_name.as_str())
            .key("book_id", AttributeValue::S(id.to_string()))
            .update_expression("SET title = :title, author = :author, title_lc = :title_lc, author_lc = :author_lc")
            .expression_attribute_values(":title", AttributeValue::S(entity.title.to_string()))
            .expression_attribute_values(":author", AttributeValue::S(entity.author.to_string()))
            .expression_attribute_values(":title_lc", AttributeValue::S(entity.title.to_lowercase()))
            .expression_attribute_values(":author_lc", AttributeValue::S(entity.author.to_lowercase()))
            .condition_expression("attribute_exists(book_id)")
            .return_values(ReturnValue::AllNew)
            .send()
            .await {
            Ok(out) => {
                out.attributes().map(map_to_book).ok_or_else(|| LibraryError::runtime(
                    format!("no attributes returned for updated book {}", id).as_str(), None))
            }
            Err(err) => {
                let missing = service_error(&err)
                    .map(|e| e.is_conditional_check_failed_exception()).unwrap_or(false);
                if missing {
                    Err(LibraryError::not_found(format!("book not found for {}", id).as_str()))
                } else {
                    Err(LibraryError::from(err))
                }
            }
        }
    }

    // Note you cannot use certain reserved words per https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/ReservedWords.html
    async fn scan(&self, filter: &BookFilter) -> LibraryResult<Vec<BookEntity>> {
        let (filter_expr, values) = contains_filter_expr(&filter.predicates());
        let mut matches = vec![];
        let mut exclusive_start_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            let mut request = self.client
                .scan()
                .table_name(self.table_name.as_str())
                .consistent_read(false)
                .set_exclusive_start_key(exclusive_start_key.take());
            if !filter_expr.is_empty() {
                request = request.filter_expression(filter_expr.as_str());
                for (k, v) in &values {
                    request = request.expression_attribute_values(k.as_str(), v.clone());
                }
            }
            let out = request.send().await?;
            if let Some(items) = out.items() {
                matches.extend(items.iter().map(map_to_book));
            }
            match out.last_evaluated_key() {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key.clone()),
                _ => break,
            }
        }
        Ok(matches)
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn save(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        match entity.id.as_deref() {
            None => self.insert(entity).await,
            Some(id) => self.update(id, entity).await,
        }
    }

    async fn find_by_id(&self, id: &str) -> LibraryResult<Option<BookEntity>> {
        let out = self.client
            .get_item()
            .table_name(self.table_name.as_str())
            .key("book_id", AttributeValue::S(id.to_string()))
            .consistent_read(true)
            .send()
            .await?;
        Ok(out.item().map(map_to_book))
    }

    async fn delete(&self, entity: &BookEntity) -> LibraryResult<()> {
        let id = entity.id.as_deref()
            .ok_or_else(|| LibraryError::invalid_argument("Book id can't be null"))?;
        let delete_book = Delete::builder()
            .table_name(self.table_name.as_str())
            .key("book_id", AttributeValue::S(id.to_string()))
            .build();
        let delete_isbn = Delete::builder()
            .table_name(self.isbn_table_name.as_str())
            .key("isbn", AttributeValue::S(entity.isbn.to_string()))
            .build();
        self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().delete(delete_book).build())
            .transact_items(TransactWriteItem::builder().delete(delete_isbn).build())
            .send()
            .await.map(|_| ()).map_err(LibraryError::from)
    }
}

#[async_trait]
impl BookRepository for DDBBookRepository {
    async fn exists_by_isbn(&self, isbn: &str) -> LibraryResult<bool> {
        let out = self.client
            .get_item()
            .table_name(self.isbn_table_name.as_str())
            .key("isbn", AttributeValue::S(isbn.to_string()))
            .consistent_read(true)
            .send()
            .await?;
        Ok(out.item().is_some())
    }

    // DynamoDB has no offset paging, so all matches are scanned and sliced here
    async fn find(&self, filter: &BookFilter,
                  page_request: &PageRequest) -> LibraryResult<PaginatedResult<BookEntity>> {
        let mut matches = self.scan(filter).await?;
        sort_books(&mut matches, page_request.sort.as_ref());
        Ok(PaginatedResult::from_matches(matches, page_request))
    }
}

fn to_item(book: &BookEntity) -> LibraryResult<HashMap<String, AttributeValue>> {
    let val = json!({
        "book_id": book.id.clone().unwrap_or_default(),
        "title": book.title,
        "author": book.author,
        "isbn": book.isbn,
        "title_lc": book.title.to_lowercase(),
        "author_lc": book.author.to_lowercase(),
        "isbn_lc": book.isbn.to_lowercase(),
    });
    parse_item(val).map_err(LibraryError::from)
}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> BookEntity {
    BookEntity {
        id: parse_string_attribute("book_id", map).filter(|id| !id.is_empty()),
        title: parse_string_attribute("title", map).unwrap_or(String::from("")),
        author: parse_string_attribute("author", map).unwrap_or(String::from("")),
        isbn: parse_string_attribute("isbn", map).unwrap_or(String::from("")),
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;

    use crate::books::domain::filter::BookFilter;
    use crate::books::domain::model::BookEntity;
    use crate::books::repository::BookRepository;
    use crate::books::repository::ddb_book_repository::{map_to_book, to_item, DDBBookRepository};
    use crate::core::library::{LibraryError, PageRequest};
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "test_books").await;
                let _ = delete_table(&client, "test_book_isbns").await;
                let _ = create_table(&client, "test_books", "book_id").await;
                let _ = create_table(&client, "test_book_isbns", "isbn").await;
                client
            });
    }

    async fn books_repo() -> DDBBookRepository {
        DDBBookRepository::new(CLIENT.get().await.clone(), "test_books", "test_book_isbns")
    }

    #[tokio::test]
    async fn test_should_map_item_with_shadow_attributes() {
        let book = BookEntity::new("The Book", "John Doe", "ISBN-1").with_id("42");
        let item = to_item(&book).expect("should build item");
        assert_eq!(7, item.len());
        assert!(item.contains_key("title_lc"));
        assert_eq!(book, map_to_book(&item));
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB-local"]
    async fn test_should_create_get_books() {
        let books_repo = books_repo().await;
        let book = BookEntity::new("test book", "someone", uuid::Uuid::new_v4().to_string().as_str());
        let saved = books_repo.save(&book).await.expect("should create book");

        let loaded = books_repo.find_by_id(saved.id.as_deref().unwrap_or_default()).await.expect("should query book");
        assert_eq!(Some(saved), loaded);
        assert!(books_repo.exists_by_isbn(book.isbn.as_str()).await.expect("should check isbn"));
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB-local"]
    async fn test_should_reject_duplicate_isbn() {
        let books_repo = books_repo().await;
        let isbn = uuid::Uuid::new_v4().to_string();
        let _ = books_repo.save(&BookEntity::new("a", "b", isbn.as_str())).await.expect("should create book");
        let res = books_repo.save(&BookEntity::new("c", "d", isbn.as_str())).await;
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB-local"]
    async fn test_should_create_update_books() {
        let books_repo = books_repo().await;
        let mut book = books_repo.save(&BookEntity::new("test book", "someone", uuid::Uuid::new_v4().to_string().as_str()))
            .await.expect("should create book");
        book.title = "new title".to_string();
        let updated = books_repo.save(&book).await.expect("should update book");
        assert_eq!("new title", updated.title.as_str());
        assert_eq!(book.isbn, updated.isbn);

        let missing = books_repo.save(&book.clone().with_id("missing")).await;
        assert!(matches!(missing, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB-local"]
    async fn test_should_create_find_books() {
        let books_repo = books_repo().await;
        let marker = uuid::Uuid::new_v4().to_string();
        for i in 0..15 {
            let book = BookEntity::new(format!("Title {} {}", marker, i).as_str(), "someone",
                                       format!("{}-{}", marker, i).as_str());
            let _ = books_repo.save(&book).await.expect("should create book");
        }
        let filter = BookFilter::new(Some(marker.to_uppercase().as_str()), None, None);
        let res = books_repo.find(&filter, &PageRequest::new(1, 10)).await.expect("should find books");
        assert_eq!(15, res.total_elements);
        assert_eq!(5, res.records.len());
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB-local"]
    async fn test_should_create_delete_books() {
        let books_repo = books_repo().await;
        let isbn = uuid::Uuid::new_v4().to_string();
        let saved = books_repo.save(&BookEntity::new("test book", "someone", isbn.as_str())).await.expect("should create book");
        books_repo.delete(&saved).await.expect("should delete book");

        let loaded = books_repo.find_by_id(saved.id.as_deref().unwrap_or_default()).await.expect("should query book");
        assert!(loaded.is_none());
        assert!(!books_repo.exists_by_isbn(isbn.as_str()).await.expect("should check isbn"));
    }
}
