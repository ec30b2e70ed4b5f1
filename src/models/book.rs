use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use sqlx::PgPool;
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime,
};

use crate::{util::non_empty, AppError};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

#[derive(Debug, Clone, sqlx::FromRow, PartialEq)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub rating: Option<i32>,
    pub notes: String,
    pub date_read: Option<Date>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Book {
    /// Value for an `<input type="date">`; empty when no date is stored.
    pub fn date_read_value(&self) -> String {
        self.date_read
            .and_then(|date| date.format(DATE_FORMAT).ok())
            .unwrap_or_default()
    }

    pub fn rating_value(&self) -> String {
        self.rating.map(|r| r.to_string()).unwrap_or_default()
    }

    pub fn updated_display(&self) -> String {
        self.updated_at
            .format(TIMESTAMP_FORMAT)
            .unwrap_or_else(|_| self.updated_at.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Title,
    Rating,
    #[default]
    DateRead,
}

impl SortKey {
    /// Anything other than `title` or `rating`, including no value at all,
    /// sorts by date read.
    pub fn from_param(param: Option<&str>) -> SortKey {
        match param {
            Some("title") => SortKey::Title,
            Some("rating") => SortKey::Rating,
            _ => SortKey::DateRead,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Rating => "rating",
            SortKey::DateRead => "date_read",
        }
    }

    pub fn order_by(&self) -> &'static str {
        match self {
            SortKey::Title => "title ASC",
            SortKey::Rating => "rating DESC NULLS LAST, date_read DESC NULLS LAST",
            SortKey::DateRead => "date_read DESC NULLS LAST",
        }
    }
}

/// The five user-editable fields as the browser posts them. Missing fields
/// come through as empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub rating: String,
    pub notes: String,
    pub date_read: String,
}

/// Column values for an insert or a full overwrite.
#[derive(Debug, Clone, PartialEq)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub rating: Option<i32>,
    pub notes: String,
    pub date_read: Option<Date>,
}

impl TryFrom<BookForm> for BookInput {
    type Error = AppError;

    fn try_from(form: BookForm) -> Result<Self, Self::Error> {
        let rating = non_empty(&form.rating)
            .map(|raw| {
                raw.parse::<i32>()
                    .map_err(|_| AppError::BadRequest(format!("Invalid rating: {}", raw)))
            })
            .transpose()?;
        let date_read = non_empty(&form.date_read)
            .map(|raw| {
                Date::parse(raw, DATE_FORMAT)
                    .map_err(|_| AppError::BadRequest(format!("Invalid date read: {}", raw)))
            })
            .transpose()?;

        Ok(BookInput {
            title: form.title,
            author: form.author,
            rating,
            notes: form.notes,
            date_read,
        })
    }
}

#[async_trait]
pub trait BookStore: Send + Sync {
    async fn list(&self, sort: SortKey) -> Result<Vec<Book>>;
    async fn get(&self, id: i32) -> Result<Option<Book>>;
    /// Returns the id the store assigned.
    async fn insert(&self, book: &BookInput) -> Result<i32>;
    /// Overwrites every editable column and bumps `updated_at`. A missing id
    /// is not an error.
    async fn update(&self, id: i32, book: &BookInput) -> Result<()>;
    /// Deleting a missing id is not an error.
    async fn delete(&self, id: i32) -> Result<()>;
}

const BOOK_COLUMNS: &str =
    "id, title, author, rating, notes, date_read, created_at, updated_at";

pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn list(&self, sort: SortKey) -> Result<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM books ORDER BY {}",
            BOOK_COLUMNS,
            sort.order_by()
        );
        let books = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn get(&self, id: i32) -> Result<Option<Book>> {
        let query = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn insert(&self, book: &BookInput) -> Result<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO books (title, author, rating, notes, date_read)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.rating)
        .bind(&book.notes)
        .bind(book.date_read)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update(&self, id: i32, book: &BookInput) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE books
            SET title = $1, author = $2, rating = $3, notes = $4, date_read = $5,
                updated_at = now()
            WHERE id = $6
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.rating)
        .bind(&book.notes)
        .bind(book.date_read)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
