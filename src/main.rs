use std::env;

use anyhow::Result;
use book_tracker::{
    app,
    config::AppConfig,
    models::book::PgBookStore,
    services::cover::OpenLibraryCovers,
    AppState,
};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let config = AppConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .connect_with(config.connect_options())
        .await?;
    let books = PgBookStore::new(pool);
    books.migrate().await?;

    let covers = OpenLibraryCovers::new(config.cover_api_url.clone());
    let app = app(AppState::new(books, covers), &config.public_dir);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    log::info!("Server running on port {}", config.port);
    axum::serve(listener, axum::ServiceExt::<axum::extract::Request>::into_make_service(app)).await?;
    Ok(())
}
