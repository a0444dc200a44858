use serde::{Deserialize, Serialize};
use crate::books::domain::model::BookEntity;

// BookFilter is a template for searching books: every populated field must be a
// case-insensitive substring of the stored value, unset fields match anything.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
}

impl BookFilter {
    pub fn new(title: Option<&str>, author: Option<&str>, isbn: Option<&str>) -> Self {
        Self {
            title: normalize(title),
            author: normalize(author),
            isbn: normalize(isbn),
        }
    }

    // populated fields as (attribute, lower-cased needle) pairs
    pub fn predicates(&self) -> Vec<(&'static str, String)> {
        let mut predicates = vec![];
        for (name, value) in [("title", &self.title), ("author", &self.author), ("isbn", &self.isbn)] {
            if let Some(value) = normalize(value.as_deref()) {
                predicates.push((name, value.to_lowercase()));
            }
        }
        predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates().is_empty()
    }

    pub fn matches(&self, book: &BookEntity) -> bool {
        self.predicates().iter().all(|(name, needle)| {
            let value = match *name {
                "title" => &book.title,
                "author" => &book.author,
                _ => &book.isbn,
            };
            value.to_lowercase().contains(needle.as_str())
        })
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use crate::books::domain::filter::BookFilter;
    use crate::books::domain::model::BookEntity;

    #[tokio::test]
    async fn test_should_match_everything_without_fields() {
        let filter = BookFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&BookEntity::new("The book", "John Doe", "123")));
    }

    #[tokio::test]
    async fn test_should_match_substring_ignoring_case() {
        let book = BookEntity::new("The Rust Book", "Steve Klabnik", "978-1718503106");
        assert!(BookFilter::new(Some("rust"), None, None).matches(&book));
        assert!(BookFilter::new(Some("BOOK"), Some("klab"), None).matches(&book));
        assert!(BookFilter::new(None, None, Some("1718")).matches(&book));
        assert!(!BookFilter::new(Some("rust"), Some("doe"), None).matches(&book));
    }

    #[tokio::test]
    async fn test_should_ignore_blank_fields() {
        let filter = BookFilter::new(Some(""), Some("  "), None);
        assert!(filter.is_empty());
        assert_eq!(vec![("isbn", "abc".to_string())], BookFilter::new(None, None, Some("ABC")).predicates());
    }
}
