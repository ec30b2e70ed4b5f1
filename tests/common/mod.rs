#![allow(dead_code)]

use std::{
    cmp::Ordering,
    sync::{
        atomic::{AtomicUsize, Ordering as AtomicOrdering},
        Arc, Mutex,
    },
};

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use book_tracker::{
    app,
    models::book::{Book, BookInput, BookStore, SortKey},
    services::cover::CoverLookup,
    App, AppState,
};
use time::{Duration, OffsetDateTime};
use tower::ServiceExt;

pub const PUBLIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/public");

/// Stand-in for Postgres: same ordering rules, ids handed out in sequence.
#[derive(Default)]
pub struct MemoryBookStore {
    rows: Mutex<Vec<Book>>,
    next_id: AtomicUsize,
}

impl MemoryBookStore {
    pub fn all(&self) -> Vec<Book> {
        self.rows.lock().unwrap().clone()
    }
}

fn desc_nulls_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list(&self, sort: SortKey) -> Result<Vec<Book>> {
        let mut books = self.all();
        match sort {
            SortKey::Title => books.sort_by(|a, b| a.title.cmp(&b.title)),
            SortKey::Rating => books.sort_by(|a, b| {
                desc_nulls_last(&a.rating, &b.rating)
                    .then_with(|| desc_nulls_last(&a.date_read, &b.date_read))
            }),
            SortKey::DateRead => books.sort_by(|a, b| desc_nulls_last(&a.date_read, &b.date_read)),
        }
        Ok(books)
    }

    async fn get(&self, id: i32) -> Result<Option<Book>> {
        Ok(self.all().into_iter().find(|book| book.id == id))
    }

    async fn insert(&self, input: &BookInput) -> Result<i32> {
        let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst) as i32 + 1;
        let now = OffsetDateTime::now_utc();
        self.rows.lock().unwrap().push(Book {
            id,
            title: input.title.clone(),
            author: input.author.clone(),
            rating: input.rating,
            notes: input.notes.clone(),
            date_read: input.date_read,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn update(&self, id: i32, input: &BookInput) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(book) = rows.iter_mut().find(|book| book.id == id) {
            book.title = input.title.clone();
            book.author = input.author.clone();
            book.rating = input.rating;
            book.notes = input.notes.clone();
            book.date_read = input.date_read;
            book.updated_at = OffsetDateTime::now_utc().max(book.updated_at + Duration::microseconds(1));
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        self.rows.lock().unwrap().retain(|book| book.id != id);
        Ok(())
    }
}

/// Answers every lookup with the same URL and counts how often it was asked.
pub struct FakeCovers {
    url: Option<String>,
    calls: AtomicUsize,
}

impl FakeCovers {
    pub fn new(url: Option<&str>) -> Self {
        Self {
            url: url.map(String::from),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(AtomicOrdering::SeqCst)
    }
}

#[async_trait]
impl CoverLookup for FakeCovers {
    async fn cover_url(&self, _title: &str) -> Option<String> {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
        self.url.clone()
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

pub struct TestApp {
    pub app: App,
    pub books: Arc<MemoryBookStore>,
}

impl TestApp {
    pub fn new(covers: Arc<dyn CoverLookup>) -> Self {
        let books = Arc::new(MemoryBookStore::default());
        let state = AppState {
            books: books.clone(),
            covers,
        };
        Self {
            app: app(state, PUBLIC_DIR),
            books,
        }
    }

    pub fn with_fake_covers(cover_url: Option<&str>) -> (Self, Arc<FakeCovers>) {
        let covers = Arc::new(FakeCovers::new(cover_url));
        (Self::new(covers.clone()), covers)
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|value| value.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            location,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
    }
}
