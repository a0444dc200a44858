use std::env;
use serde::{Deserialize, Serialize};

// Identifiable defines common traits that can be shared by persistent objects.
// The id is assigned by the store on first save, so it is absent before that.
pub trait Identifiable : Sync + Send {
    fn id(&self) -> Option<String>;

    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 2000;

// Configuration abstracts config options for the catalog service
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub stage: String,
    pub books_table: String,
    pub isbn_table: String,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Configuration {
    pub fn new(stage: &str) -> Self {
        Configuration {
            stage: stage.to_string(),
            books_table: "books".to_string(),
            isbn_table: "book_isbns".to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }

    // defaults overridden by LIBRARY_* environment variables
    pub fn from_env(default_stage: &str) -> Self {
        let mut config = Configuration::new(
            env::var("LIBRARY_STAGE").unwrap_or(default_stage.to_string()).as_str());
        if let Ok(table) = env::var("LIBRARY_BOOKS_TABLE") {
            config.books_table = table;
        }
        if let Ok(table) = env::var("LIBRARY_ISBN_TABLE") {
            config.isbn_table = table;
        }
        if let Some(size) = parse_size_var("LIBRARY_DEFAULT_PAGE_SIZE") {
            config.default_page_size = size;
        }
        if let Some(size) = parse_size_var("LIBRARY_MAX_PAGE_SIZE") {
            config.max_page_size = size;
        }
        config.default_page_size = config.default_page_size.min(config.max_page_size);
        config
    }

    // size 0 or missing falls back to the default, anything above the maximum is clamped
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        match requested {
            None | Some(0) => self.default_page_size,
            Some(size) => size.min(self.max_page_size),
        }
    }
}

fn parse_size_var(name: &str) -> Option<usize> {
    env::var(name).ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|size| *size > 0)
}
