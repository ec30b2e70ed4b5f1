use askama::Template;
use axum::{extract::Query, Extension};

use crate::{
    models::book::{Book, SortKey},
    AppError, AppState,
};

#[derive(Template)]
#[template(path = "index.html")]
pub struct BookList {
    books: Vec<Book>,
    sort_by: &'static str,
}

/// The `sort` value, but only when it appears exactly once. A repeated key
/// is not a selector we recognize.
fn sort_param(pairs: &[(String, String)]) -> Option<&str> {
    let mut values = pairs
        .iter()
        .filter(|(key, _)| key == "sort")
        .map(|(_, value)| value.as_str());
    match (values.next(), values.next()) {
        (Some(value), None) => Some(value),
        _ => None,
    }
}

#[axum::debug_handler]
pub async fn view_book_list(
    Extension(state): Extension<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<BookList, AppError> {
    let sort = SortKey::from_param(sort_param(&params));
    let books = state.books.list(sort).await?;
    Ok(BookList {
        books,
        sort_by: sort.as_str(),
    })
}
