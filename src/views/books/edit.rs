use askama::Template;
use axum::{extract::Path, response::Redirect, Extension};
use axum_extra::extract::Form;

use crate::{
    models::book::{Book, BookForm, BookInput},
    AppError, AppState,
};

#[derive(Template)]
#[template(path = "edit-book.html")]
pub struct EditBook {
    book: Book,
}

#[axum::debug_handler]
pub async fn view_edit_book(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> Result<EditBook, AppError> {
    match state.books.get(id).await? {
        Some(book) => Ok(EditBook { book }),
        None => Err(AppError::NotFound("Book not found".into())),
    }
}

/// Full overwrite: fields missing from the form are stored empty.
#[axum::debug_handler]
pub async fn put_book(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<BookForm>,
) -> Result<Redirect, AppError> {
    let input = BookInput::try_from(form)?;
    state.books.update(id, &input).await?;
    Ok(Redirect::to(&format!("/books/{}", id)))
}
