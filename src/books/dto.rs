use serde::{Deserialize, Serialize};
use crate::books::domain::model::BookEntity;
use crate::core::domain::Identifiable;

// BookDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookDto {
    pub id: Option<String>,
    pub title: String,
    pub author: String,
    pub isbn: String,
}

impl BookDto {
    pub fn new(title: &str, author: &str, isbn: &str) -> BookDto {
        BookDto {
            id: None,
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
        }
    }
}

impl Identifiable for BookDto {
    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            id: other.id.clone(),
            title: other.title.to_string(),
            author: other.author.to_string(),
            isbn: other.isbn.to_string(),
        }
    }
}

impl From<BookEntity> for BookDto {
    fn from(other: BookEntity) -> Self {
        Self {
            id: other.id,
            title: other.title,
            author: other.author,
            isbn: other.isbn,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            id: other.id.clone(),
            title: other.title.to_string(),
            author: other.author.to_string(),
            isbn: other.isbn.to_string(),
        }
    }
}
