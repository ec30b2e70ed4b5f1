use axum::{
    routing::{get, post},
    Router,
};

mod delete;
mod details;
mod edit;
pub mod list;
mod new;

pub fn get_routes() -> axum::Router {
    Router::new()
        .route("/", post(new::post_new_book))
        .route("/new", get(new::view_new_book))
        .route(
            "/:id",
            get(details::view_book_details)
                .put(edit::put_book)
                .delete(delete::delete_book),
        )
        .route("/:id/edit", get(edit::view_edit_book))
}
