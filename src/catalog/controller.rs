use axum::{
    body::HttpBody,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    routing::get,
    BoxError, Router,
};
use serde_json::Value;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::find_books_cmd::{FindBooksCommand, FindBooksCommandRequest, FindBooksCommandResponse};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest, GetBookCommandResponse};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest, UpdateBookCommandResponse};
use crate::core::command::Command;
use crate::core::controller::{
    AppState, json_rejection_to_server_error, json_to_server_error, query_rejection_to_server_error, ServerError};

// generic over the request body so the same routes serve hyper and the Lambda adapter
pub(crate) fn router<B>(state: AppState) -> Router<(), B>
    where B: HttpBody + Send + 'static,
          B::Data: Send,
          B::Error: Into<BoxError> {
    Router::new()
        .route("/api/books", get(find_books).post(add_book))
        .route("/api/books/", get(find_books).post(add_book))
        .route("/api/books/:id",
               get(find_book_by_id).put(update_book).delete(remove_book))
        .with_state(state)
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    json: Result<Json<Value>, JsonRejection>) -> Result<(StatusCode, Json<AddBookCommandResponse>), ServerError> {
    let Json(value) = json.map_err(json_rejection_to_server_error)?;
    let req: AddBookCommandRequest = serde_json::from_value(value).map_err(json_to_server_error)?;
    let res = AddBookCommand::new(state.catalog_service).execute(req).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub(crate) async fn find_book_by_id(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<GetBookCommandResponse>, ServerError> {
    let req = GetBookCommandRequest::new(book_id);
    let res = GetBookCommand::new(state.catalog_service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    json: Result<Json<Value>, JsonRejection>) -> Result<Json<UpdateBookCommandResponse>, ServerError> {
    let Json(value) = json.map_err(json_rejection_to_server_error)?;
    let mut req: UpdateBookCommandRequest = serde_json::from_value(value).map_err(json_to_server_error)?;
    req.book_id = book_id;
    let res = UpdateBookCommand::new(state.catalog_service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<StatusCode, ServerError> {
    let req = RemoveBookCommandRequest::new(book_id);
    let _ = RemoveBookCommand::new(state.catalog_service).execute(req).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn find_books(
    State(state): State<AppState>,
    query: Result<Query<FindBooksCommandRequest>, QueryRejection>) -> Result<Json<FindBooksCommandResponse>, ServerError> {
    let Query(req) = query.map_err(query_rejection_to_server_error)?;
    let res = FindBooksCommand::new(state.catalog_service, &state.config).execute(req).await?;
    Ok(Json(res))
}
