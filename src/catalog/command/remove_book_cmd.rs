use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct RemoveBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl RemoveBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoveBookCommandRequest {
    pub(crate) book_id: String,
}

impl RemoveBookCommandRequest {
    pub fn new(book_id: String) -> Self {
        Self {
            book_id,
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub(crate) struct RemoveBookCommandResponse {}

#[async_trait]
impl Command<RemoveBookCommandRequest, RemoveBookCommandResponse> for RemoveBookCommand {
    async fn execute(&self, req: RemoveBookCommandRequest) -> Result<RemoveBookCommandResponse, CommandError> {
        let book = self.catalog_service.find_book_by_id(req.book_id.as_str()).await
            .map_err(CommandError::from)?
            .ok_or_else(|| CommandError::not_found(format!("book not found for {}", req.book_id).as_str()))?;
        self.catalog_service.remove_book(&book).await
            .map_err(CommandError::from).map(|_| RemoveBookCommandResponse::default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
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
    async fn test_should_run_remove_book() {
        let add_cmd = AddBookCommand::new(SUT_SVC.get().await.clone());
        let remove_cmd = RemoveBookCommand::new(SUT_SVC.get().await.clone());

        let res = add_cmd.execute(AddBookCommandRequest::new("test book", "someone", "remove-123"))
            .await.expect("should add book");
        let book_id = res.book.id.clone().unwrap_or_default();
        let _ = remove_cmd.execute(RemoveBookCommandRequest::new(book_id.clone())).await.expect("should remove book");

        let again = remove_cmd.execute(RemoveBookCommandRequest::new(book_id)).await;
        assert!(matches!(again, Err(CommandError::NotFound { .. })));
    }
}
