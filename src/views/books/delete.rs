use axum::{extract::Path, response::Redirect, Extension};

use crate::{AppError, AppState};

#[axum::debug_handler]
pub async fn delete_book(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    state.books.delete(id).await?;
    Ok(Redirect::to("/"))
}
