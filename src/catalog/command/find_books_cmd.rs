use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::domain::filter::BookFilter;
use crate::books::domain::model::SORTABLE_PROPERTIES;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::domain::Configuration;
use crate::core::library::{PageRequest, PaginatedResult, Sort};

pub(crate) struct FindBooksCommand {
    catalog_service: Arc<dyn CatalogService>,
    config: Configuration,
}

impl FindBooksCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>, config: &Configuration) -> Self {
        Self {
            catalog_service,
            config: config.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FindBooksCommandRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub page: Option<String>,
    pub size: Option<String>,
    pub sort: Option<String>,
}

// blank or non-numeric paging values fall back to the defaults
fn parse_number(value: Option<&str>) -> Option<usize> {
    value.and_then(|v| v.trim().parse().ok())
}

impl FindBooksCommandRequest {
    pub fn build_filter(&self) -> BookFilter {
        BookFilter::new(self.title.as_deref(), self.author.as_deref(), self.isbn.as_deref())
    }

    pub fn build_page_request(&self, config: &Configuration) -> Result<PageRequest, CommandError> {
        let page_request = PageRequest::new(
            parse_number(self.page.as_deref()).unwrap_or(0),
            config.page_size(parse_number(self.size.as_deref())));
        match self.sort.as_deref().and_then(Sort::parse) {
            None => Ok(page_request),
            Some(sort) if SORTABLE_PROPERTIES.contains(&sort.property.as_str()) => Ok(page_request.with_sort(sort)),
            Some(sort) => Err(CommandError::validation(vec![
                format!("cannot sort by {}, expected one of {}", sort.property, SORTABLE_PROPERTIES.join(", "))])),
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Pageable {
    pub page_number: usize,
    pub page_size: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FindBooksCommandResponse {
    pub content: Vec<BookDto>,
    pub total_elements: usize,
    pub total_pages: usize,
    pub pageable: Pageable,
}

impl From<PaginatedResult<BookDto>> for FindBooksCommandResponse {
    fn from(res: PaginatedResult<BookDto>) -> Self {
        Self {
            total_elements: res.total_elements,
            total_pages: res.total_pages(),
            pageable: Pageable { page_number: res.page, page_size: res.page_size },
            content: res.records,
        }
    }
}

#[async_trait]
impl Command<FindBooksCommandRequest, FindBooksCommandResponse> for FindBooksCommand {
    async fn execute(&self, req: FindBooksCommandRequest) -> Result<FindBooksCommandResponse, CommandError> {
        let page_request = req.build_page_request(&self.config)?;
        self.catalog_service.find_books(&req.build_filter(), &page_request).await
            .map_err(CommandError::from).map(FindBooksCommandResponse::from)
    }
}
