//! Book catalog endpoints.
//!
//! ```text
//! GET    /api/Books
//! GET    /api/Books/{criteria}/{search}
//! GET    /api/Book/{id}
//! POST   /api/Books          {"title":"Dune","author":"Frank Herbert"}
//! PUT    /api/Books          {"id":"1","title":"Dune Messiah"}
//! DELETE /api/Books?id=1
//! ```
//!
//! Every route requires a bearer token. Handlers only translate between HTTP
//! and the catalog ports; criteria resolution and existence checks live in
//! [`CatalogService`](crate::domain::CatalogService).

use actix_web::{delete, get, post, put, web};
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

use crate::domain::{Book, BookId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::{BookSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Query string for `DELETE /api/Books`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteBookQuery {
    /// Identifier of the book to delete.
    #[param(example = "1")]
    pub id: Option<String>,
}

fn parse_book_id(raw: String) -> Result<BookId, Error> {
    BookId::new(raw).map_err(|err| Error::invalid_request(err.to_string()))
}

/// Register the catalog routes on a scope mounted at `/api`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use book_catalog::inbound::http::books;
///
/// let app = App::new().service(web::scope("/api").configure(books::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_books)
        .service(search_books)
        .service(get_book)
        .service(create_book)
        .service(update_book)
        .service(delete_book);
}

/// List every book in store order.
#[utoipa::path(
    get,
    path = "/api/Books",
    responses(
        (status = 200, description = "All books", body = [BookSchema]),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 503, description = "Book store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "listBooks"
)]
#[get("/Books")]
pub async fn list_books(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<web::Json<Vec<Book>>> {
    debug!(subject = %caller.principal(), "listing books");
    let books = state.catalog_query.get_all().await?;
    Ok(web::Json(books))
}

/// Find books whose `criteria` attribute contains `search`, ignoring case.
///
/// Unknown criteria names yield an empty list.
#[utoipa::path(
    get,
    path = "/api/Books/{criteria}/{search}",
    params(
        ("criteria" = String, Path, description = "Book attribute to search, e.g. title or author", example = "title"),
        ("search" = String, Path, description = "Text the attribute must contain", example = "dune")
    ),
    responses(
        (status = 200, description = "Matching books", body = [BookSchema]),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 503, description = "Book store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "searchBooks"
)]
#[get("/Books/{criteria}/{search}")]
pub async fn search_books(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<Vec<Book>>> {
    let (criteria, search) = path.into_inner();
    debug!(subject = %caller.principal(), %criteria, %search, "searching books");
    let books = state
        .catalog_query
        .get_by_criteria(&criteria, &search)
        .await?;
    Ok(web::Json(books))
}

/// Fetch a single book.
#[utoipa::path(
    get,
    path = "/api/Book/{id}",
    params(("id" = String, Path, description = "Book identifier", example = "1")),
    responses(
        (status = 200, description = "The book", body = BookSchema),
        (status = 400, description = "Blank identifier", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 404, description = "No book with this identifier", body = ErrorSchema),
        (status = 503, description = "Book store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "getBook"
)]
#[get("/Book/{id}")]
pub async fn get_book(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<Book>> {
    let id = parse_book_id(path.into_inner())?;
    debug!(subject = %caller.principal(), book_id = %id, "fetching book");
    state
        .catalog_query
        .get_by_id(&id)
        .await?
        .map(web::Json)
        .ok_or_else(|| Error::not_found(format!("book {id} not found")))
}

/// Store a new book and return it with its assigned identifier.
#[utoipa::path(
    post,
    path = "/api/Books",
    request_body = BookSchema,
    responses(
        (status = 200, description = "The stored book", body = BookSchema),
        (status = 400, description = "Malformed book payload", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 503, description = "Book store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "createBook"
)]
#[post("/Books")]
pub async fn create_book(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<Book>,
) -> ApiResult<web::Json<Book>> {
    debug!(subject = %caller.principal(), "creating book");
    let stored = state.catalog_command.create(payload.into_inner()).await?;
    Ok(web::Json(stored))
}

/// Replace an existing book.
///
/// Responds `true` when a book with the payload's `id` existed and was
/// replaced, `false` otherwise.
#[utoipa::path(
    put,
    path = "/api/Books",
    request_body = BookSchema,
    responses(
        (status = 200, description = "Whether the book was replaced", body = bool),
        (status = 400, description = "Malformed book payload", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 503, description = "Book store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "updateBook"
)]
#[put("/Books")]
pub async fn update_book(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<Book>,
) -> ApiResult<web::Json<bool>> {
    let book = payload.into_inner();
    debug!(subject = %caller.principal(), book_id = ?book.id, "updating book");
    let updated = state.catalog_command.update(book).await?;
    Ok(web::Json(updated))
}

/// Delete a book.
///
/// Responds `true` when the book existed and was removed, `false` otherwise.
#[utoipa::path(
    delete,
    path = "/api/Books",
    params(DeleteBookQuery),
    responses(
        (status = 200, description = "Whether the book was deleted", body = bool),
        (status = 400, description = "Missing or blank id", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 503, description = "Book store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "deleteBook"
)]
#[delete("/Books")]
pub async fn delete_book(
    state: web::Data<HttpState>,
    caller: Authenticated,
    query: web::Query<DeleteBookQuery>,
) -> ApiResult<web::Json<bool>> {
    let raw = query
        .into_inner()
        .id
        .ok_or_else(|| Error::invalid_request("query parameter `id` is required"))?;
    let id = parse_book_id(raw)?;
    debug!(subject = %caller.principal(), book_id = %id, "deleting book");
    let deleted = state.catalog_command.delete(&id).await?;
    Ok(web::Json(deleted))
}

#[cfg(test)]
#[path = "books_tests.rs"]
mod tests;
