use askama::Template;
use axum::{extract::Path, Extension};

use crate::{models::book::Book, AppError, AppState};

#[derive(Template)]
#[template(path = "book.html")]
pub struct BookDetails {
    book: Book,
    cover_url: Option<String>,
}

#[axum::debug_handler]
pub async fn view_book_details(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> Result<BookDetails, AppError> {
    let book = match state.books.get(id).await? {
        Some(book) => book,
        None => return Err(AppError::NotFound("Book not found".into())),
    };
    let cover_url = state.covers.cover_url(&book.title).await;
    Ok(BookDetails { book, cover_url })
}
