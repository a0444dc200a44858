include!("../../lib.rs");
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use lambda_http::{run, Error};
use tracing::info;
use crate::catalog::controller::router;
use crate::catalog::factory::create_catalog_service;
use crate::core::controller::AppState;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::utils::logs::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html
//
// LIBRARY_STORE picks the repository (dynamodb, local-dynamodb, memory) and
// LIBRARY_HTTP_ADDR serves plain HTTP instead of the Lambda runtime, e.g. 127.0.0.1:3000.

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let config = Configuration::from_env("dev");
    let store = RepositoryStore::from_env(RepositoryStore::InMemory);
    let catalog_service = create_catalog_service(&config, store).await;
    info!("starting catalog stage={} store={:?}", config.stage, store);
    let state = AppState::new(config, Arc::from(catalog_service));

    match env::var("LIBRARY_HTTP_ADDR") {
        Ok(addr) => {
            let addr: SocketAddr = addr.parse()?;
            info!("listening on {}", addr);
            let app = router::<axum::body::Body>(state);
            axum::Server::bind(&addr).serve(app.into_make_service()).await?;
            Ok(())
        }
        Err(_) => {
            let app = router::<lambda_http::Body>(state);
            run(app).await
        }
    }
}
