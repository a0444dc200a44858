use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum LibraryError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    AccessDenied {
        message: String,
        reason_code: Option<String>,
    },
    // Raised by the store when a write would break a unique constraint, e.g. two
    // concurrent creates that both passed the ISBN existence check.
    DuplicateKey {
        message: String,
    },
    // Business rule violation raised by the catalog when the ISBN is already taken.
    DuplicateIsbn {
        message: String,
    },
    InvalidArgument {
        message: String,
    },
    NotFound {
        message: String,
    },
    // This is a retry-able error, which indicates that the store could not be reached
    // or throttled the request. The caller can retry with or without a backoff.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn access_denied(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::AccessDenied { message: message.to_string(), reason_code }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn duplicate_isbn(message: &str) -> LibraryError {
        LibraryError::DuplicateIsbn { message: message.to_string() }
    }

    pub fn invalid_argument(message: &str) -> LibraryError {
        LibraryError::InvalidArgument { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> LibraryError {
        if retryable {
            LibraryError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else if let Some(ref reason_val) = reason {
            if reason_val.as_str().contains("404") {
                LibraryError::not_found(
                    format!("not found error {:?} {:?}", message, reason).as_str())
            } else if reason_val.as_str().contains("400") {
                LibraryError::access_denied(
                    format!("access-denied error {:?} {:?}", message, reason).as_str(), reason)
            } else {
                LibraryError::database(
                    format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        } else {
            LibraryError::database(
                format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Database { retryable, .. } => { *retryable }
            LibraryError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            _ => { false }
        }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::runtime(
            format!("serde io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for LibraryError {
    fn from(err: String) -> Self {
        LibraryError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::AccessDenied { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::DuplicateIsbn { message } => {
                write!(f, "{}", message)
            }
            LibraryError::InvalidArgument { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

/// A specialized Result type for the catalog and its repositories.
pub type LibraryResult<T> = Result<T, LibraryError>;

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum Direction {
    Asc,
    Desc,
}

impl From<String> for Direction {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "desc" => Direction::Desc,
            _ => Direction::Asc,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Direction::Asc => write!(f, "asc"),
            Direction::Desc => write!(f, "desc"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Sort {
    pub property: String,
    pub direction: Direction,
}

impl Sort {
    pub fn new(property: &str, direction: Direction) -> Self {
        Sort {
            property: property.to_string(),
            direction,
        }
    }

    // parses `property` or `property,asc|desc` as sent in the `sort` query parameter
    pub fn parse(value: &str) -> Option<Sort> {
        let mut parts = value.split(',').map(str::trim);
        let property = parts.next().filter(|p| !p.is_empty())?;
        let direction = parts.next().map(|d| Direction::from(d.to_string())).unwrap_or(Direction::Asc);
        Some(Sort::new(property, direction))
    }
}

// PageRequest selects a zero-based page of a query result
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
    pub sort: Option<Sort>,
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        PageRequest {
            page,
            size: size.max(1),
            sort: None,
        }
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

// It defines abstraction for paginated result
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    // zero-based page number
    pub page: usize,
    // page size
    pub page_size: usize,
    // number of matches across all pages
    pub total_elements: usize,
    // list of records
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub(crate) fn new(page: usize, page_size: usize, total_elements: usize, records: Vec<T>) -> Self {
        PaginatedResult {
            page,
            page_size,
            total_elements,
            records,
        }
    }

    // slices all matches of a query down to the requested page
    pub(crate) fn from_matches(matches: Vec<T>, page_request: &PageRequest) -> Self {
        let total_elements = matches.len();
        let records = matches.into_iter()
            .skip(page_request.offset())
            .take(page_request.size)
            .collect();
        PaginatedResult::new(page_request.page, page_request.size, total_elements, records)
    }

    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        (self.total_elements + self.page_size - 1) / self.page_size
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PaginatedResult<U> {
        PaginatedResult::new(self.page, self.page_size, self.total_elements,
                             self.records.into_iter().map(f).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::{Direction, LibraryError, PageRequest, PaginatedResult, Sort};

    #[tokio::test]
    async fn test_should_create_database_error() {
        assert!(matches!(LibraryError::database("test", None, false), LibraryError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_access_error() {
        assert!(matches!(LibraryError::access_denied("test", None), LibraryError::AccessDenied{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_duplicate_errors() {
        assert!(matches!(LibraryError::duplicate_key("test"), LibraryError::DuplicateKey{ message: _ }));
        assert!(matches!(LibraryError::duplicate_isbn("test"), LibraryError::DuplicateIsbn{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_invalid_argument_error() {
        let err = LibraryError::invalid_argument("Book id can't be null");
        assert!(matches!(err, LibraryError::InvalidArgument{ message: _ }));
        assert_eq!("Book id can't be null", err.to_string());
    }

    #[tokio::test]
    async fn test_should_create_not_found_error() {
        assert!(matches!(LibraryError::not_found("test"), LibraryError::NotFound{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_database_or_unavailable_error() {
        assert!(matches!(LibraryError::database_or_unavailable("test", None, true), LibraryError::CurrentlyUnavailable{ message: _, reason_code: _, retryable: _ }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("404".to_string()), false), LibraryError::NotFound{ message: _ }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("400".to_string()), false), LibraryError::AccessDenied{ message: _, reason_code: _ }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("500".to_string()), false), LibraryError::Database{ message: _, reason_code: _, retryable: _ }));
        assert!(matches!(LibraryError::database_or_unavailable("test", None, false), LibraryError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_retryable_error() {
        assert!(!LibraryError::database("test", None, false).retryable());
        assert!(!LibraryError::duplicate_isbn("test").retryable());
        assert!(!LibraryError::invalid_argument("test").retryable());
        assert!(!LibraryError::unavailable("test", None, false).retryable());
        assert!(LibraryError::unavailable("test", None, true).retryable());
        assert!(!LibraryError::validation("test", None).retryable());
        assert!(!LibraryError::runtime("test", None).retryable());
    }

    #[tokio::test]
    async fn test_should_parse_sort() {
        assert_eq!(Some(Sort::new("title", Direction::Asc)), Sort::parse("title"));
        assert_eq!(Some(Sort::new("title", Direction::Desc)), Sort::parse("title,DESC"));
        assert_eq!(Some(Sort::new("author", Direction::Asc)), Sort::parse("author, asc"));
        assert_eq!(None, Sort::parse(""));
        assert_eq!(None, Sort::parse(",desc"));
    }

    #[tokio::test]
    async fn test_should_slice_matches_into_page() {
        let matches: Vec<usize> = (0..25).collect();
        let res = PaginatedResult::from_matches(matches.clone(), &PageRequest::new(1, 10));
        assert_eq!(vec![10, 11, 12, 13, 14, 15, 16, 17, 18, 19], res.records);
        assert_eq!(25, res.total_elements);
        assert_eq!(3, res.total_pages());

        let last = PaginatedResult::from_matches(matches.clone(), &PageRequest::new(2, 10));
        assert_eq!(5, last.records.len());

        let beyond = PaginatedResult::from_matches(matches, &PageRequest::new(9, 10));
        assert!(beyond.records.is_empty());
        assert_eq!(25, beyond.total_elements);
    }

    #[tokio::test]
    async fn test_should_map_records_keeping_page() {
        let res = PaginatedResult::from_matches((0..25).collect::<Vec<usize>>(), &PageRequest::new(2, 10));
        let mapped = res.map(|n| format!("book-{}", n));
        assert_eq!(vec!["book-20", "book-21", "book-22", "book-23", "book-24"], mapped.records);
        assert_eq!(2, mapped.page);
        assert_eq!(25, mapped.total_elements);
    }
}
