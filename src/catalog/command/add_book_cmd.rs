use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct AddBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AddBookCommandRequest {
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) author: Option<String>,
    #[serde(default)]
    pub(crate) isbn: Option<String>,
}

impl AddBookCommandRequest {
    pub fn new(title: &str, author: &str, isbn: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            isbn: Some(isbn.to_string()),
        }
    }

    // one message per missing or blank field
    pub fn validate(&self) -> Result<(), CommandError> {
        let errors: Vec<String> = [("title", &self.title), ("author", &self.author), ("isbn", &self.isbn)]
            .iter()
            .filter(|(_, value)| value.as_deref().map(|v| v.trim().is_empty()).unwrap_or(true))
            .map(|(name, _)| format!("{} must not be empty", name))
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CommandError::validation(errors))
        }
    }

    pub fn build_book(&self) -> BookDto {
        BookDto::new(self.title.as_deref().unwrap_or_default(),
                     self.author.as_deref().unwrap_or_default(),
                     self.isbn.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct AddBookCommandResponse {
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        req.validate()?;
        let book = req.build_book();
        self.catalog_service.add_book(&book).await.map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}
