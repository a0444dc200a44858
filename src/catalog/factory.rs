use crate::books::factory;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;

pub(crate) async fn create_catalog_service(config: &Configuration, store: RepositoryStore) -> Box<dyn CatalogService> {
    let book_repo = factory::create_book_repository(config, store).await;
    Box::new(CatalogServiceImpl::new(book_repo))
}
