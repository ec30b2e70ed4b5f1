use askama::Template;
use axum::{response::Redirect, Extension};
use axum_extra::extract::Form;

use crate::{
    models::book::{BookForm, BookInput},
    AppError, AppState,
};

#[derive(Template)]
#[template(path = "add-book.html")]
pub struct NewBook {}

#[axum::debug_handler]
pub async fn view_new_book() -> NewBook {
    NewBook {}
}

#[axum::debug_handler]
pub async fn post_new_book(
    Extension(state): Extension<AppState>,
    Form(form): Form<BookForm>,
) -> Result<Redirect, AppError> {
    let input = BookInput::try_from(form)?;
    let id = state.books.insert(&input).await?;
    log::info!("added book {} ({:?})", id, input.title);
    Ok(Redirect::to("/"))
}
