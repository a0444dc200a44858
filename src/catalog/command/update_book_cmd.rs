use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

// Only title and author can change; the id comes from the path and the isbn is kept.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct UpdateBookCommandRequest {
    #[serde(default)]
    pub book_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl UpdateBookCommandRequest {
    pub fn new(book_id: &str, title: &str, author: &str) -> Self {
        Self {
            book_id: book_id.to_string(),
            title: Some(title.to_string()),
            author: Some(author.to_string()),
        }
    }

    // copies the new values onto the stored book, absent fields keep their value
    pub fn merge_into(&self, stored: BookDto) -> BookDto {
        BookDto {
            title: self.title.clone().unwrap_or(stored.title),
            author: self.author.clone().unwrap_or(stored.author),
            ..stored
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct UpdateBookCommandResponse {
    pub book: BookDto,
}

impl UpdateBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        let stored = self.catalog_service.find_book_by_id(req.book_id.as_str()).await
            .map_err(CommandError::from)?
            .ok_or_else(|| CommandError::not_found(format!("book not found for {}", req.book_id).as_str()))?;
        let book = req.merge_into(stored);
        self.catalog_service.update_book(&book).await.map_err(CommandError::from).map(UpdateBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::books::dto::BookDto;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref SUT_SVC : AsyncOnce<Arc<dyn CatalogService>> = AsyncOnce::new(async {
                Arc::from(factory::create_catalog_service(&Configuration::new("test"), RepositoryStore::InMemory).await)
            });
    }

    #[tokio::test]
    async fn test_should_run_update_book() {
        let add_cmd = AddBookCommand::new(SUT_SVC.get().await.clone());
        let update_cmd = UpdateBookCommand::new(SUT_SVC.get().await.clone());

        let added = add_cmd.execute(AddBookCommandRequest::new("The book", "John Doe", "update-123"))
            .await.expect("should add book");
        let book_id = added.book.id.clone().unwrap_or_default();
        let res = update_cmd.execute(UpdateBookCommandRequest::new(book_id.as_str(), "New", "John Doe"))
            .await.expect("should update book");
        assert_eq!("New", res.book.title.as_str());
        assert_eq!("update-123", res.book.isbn.as_str());
        assert_eq!(added.book.id, res.book.id);
    }

    #[tokio::test]
    async fn test_should_not_update_unknown_book() {
        let update_cmd = UpdateBookCommand::new(SUT_SVC.get().await.clone());
        let res = update_cmd.execute(UpdateBookCommandRequest::new("unknown", "New", "John Doe")).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_merge_only_given_fields() {
        let stored = BookDto { id: Some("1".to_string()), ..BookDto::new("Old", "John Doe", "123") };
        let req = UpdateBookCommandRequest { book_id: "1".to_string(), title: Some("New".to_string()), author: None };
        let merged = req.merge_into(stored);
        assert_eq!("New", merged.title.as_str());
        assert_eq!("John Doe", merged.author.as_str());
        assert_eq!("123", merged.isbn.as_str());
        assert_eq!(Some("1".to_string()), merged.id);
    }
}
