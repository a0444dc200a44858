use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct GetBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl GetBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetBookCommandRequest {
    pub(crate) book_id: String,
}

impl GetBookCommandRequest {
    pub fn new(book_id: String) -> Self {
        Self {
            book_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct GetBookCommandResponse {
    book: BookDto,
}

impl GetBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<GetBookCommandRequest, GetBookCommandResponse> for GetBookCommand {
    async fn execute(&self, req: GetBookCommandRequest) -> Result<GetBookCommandResponse, CommandError> {
        self.catalog_service.find_book_by_id(req.book_id.as_str()).await
            .map_err(CommandError::from)?
            .map(GetBookCommandResponse::new)
            .ok_or_else(|| CommandError::not_found(format!("book not found for {}", req.book_id).as_str()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
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
    async fn test_should_run_get_book() {
        let add_cmd = AddBookCommand::new(SUT_SVC.get().await.clone());
        let get_cmd = GetBookCommand::new(SUT_SVC.get().await.clone());

        let req = AddBookCommandRequest::new("test book", "someone", "get-123");
        let res = add_cmd.execute(req).await.expect("should add book");
        let loaded = get_cmd.execute(GetBookCommandRequest::new(res.book.id.clone().unwrap_or_default()))
            .await.expect("should get book");
        assert_eq!(res.book, loaded.book);
    }

    #[tokio::test]
    async fn test_should_not_find_unknown_book() {
        let get_cmd = GetBookCommand::new(SUT_SVC.get().await.clone());
        let res = get_cmd.execute(GetBookCommandRequest::new("unknown".to_string())).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
