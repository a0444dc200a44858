use std::cmp::Ordering;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::{Direction, Sort};

// BookEntity abstracts a catalogued book. The id is assigned by the repository when the
// book is first saved and the isbn is unique across the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookEntity {
    #[serde(rename = "book_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub author: String,
    pub isbn: String,
}

pub(crate) const SORTABLE_PROPERTIES: [&str; 4] = ["id", "title", "author", "isbn"];

impl BookEntity {
    pub fn new(title: &str, author: &str, isbn: &str) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    fn property(&self, name: &str) -> &str {
        match name {
            "id" => self.id.as_deref().unwrap_or_default(),
            "title" => self.title.as_str(),
            "author" => self.author.as_str(),
            "isbn" => self.isbn.as_str(),
            _ => "",
        }
    }

    pub fn compare_by(&self, other: &BookEntity, sort: &Sort) -> Ordering {
        let ord = self.property(sort.property.as_str()).to_lowercase()
            .cmp(&other.property(sort.property.as_str()).to_lowercase());
        match sort.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    }
}

// stable sort, so equal keys keep the order the store returned them in
pub(crate) fn sort_books(books: &mut [BookEntity], sort: Option<&Sort>) {
    if let Some(sort) = sort {
        books.sort_by(|a, b| a.compare_by(b, sort));
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}
