use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use pavilion_reviews::error::StoreError;
use pavilion_reviews::models::pavilion::Pavilion;
use pavilion_reviews::models::review::{NewReview, Review};
use pavilion_reviews::store::PavilionStore;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory store that counts every call and can be told to fail.
#[derive(Default)]
pub struct MockStore {
    pub pavilions: Mutex<Vec<Pavilion>>,
    pub reviews: Mutex<Vec<Review>>,
    pub fail_pavilions: AtomicBool,
    pub fail_reviews: AtomicBool,
    pub fail_inserts: AtomicBool,
    pub list_pavilions_calls: AtomicUsize,
    pub get_pavilion_calls: AtomicUsize,
    pub list_reviews_calls: AtomicUsize,
    pub insert_calls: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two pavilions; pavilion 2 has one positive review, pavilion 1 has none.
    pub fn with_test_data() -> Self {
        let mock = Self::new();
        *mock.pavilions.lock().unwrap() = vec![
            pavilion(1, "Japan Pavilion"),
            pavilion(2, "USA Pavilion"),
        ];
        *mock.reviews.lock().unwrap() = vec![review(100, 2, "Ken", "Loved the rocket", true, 0)];
        mock
    }

    pub fn fetch_count(&self) -> usize {
        self.list_pavilions_calls.load(Ordering::SeqCst)
            + self.get_pavilion_calls.load(Ordering::SeqCst)
            + self.list_reviews_calls.load(Ordering::SeqCst)
    }

    pub fn inserts(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn stored_reviews(&self) -> Vec<Review> {
        self.reviews.lock().unwrap().clone()
    }
}

pub fn pavilion(id: i64, name: &str) -> Pavilion {
    Pavilion {
        id,
        name: name.to_string(),
        description: format!("{} description", name),
        image_url: format!("/pavilion-img/{}.png", id),
    }
}

/// A stored review created `minute` minutes after a fixed epoch.
pub fn review(id: i64, pavilion_id: i64, name: &str, comment: &str, again: bool, minute: u32) -> Review {
    Review {
        id,
        pavilion_id,
        name: Some(name.to_string()),
        comment: comment.to_string(),
        again: Some(again),
        created_at: Utc.with_ymd_and_hms(2025, 4, 13, 9, minute, 0).unwrap(),
    }
}

fn failure() -> StoreError {
    StoreError::Transport("mock store is offline".to_string())
}

#[async_trait(?Send)]
impl PavilionStore for MockStore {
    async fn list_pavilions(&self) -> Result<Vec<Pavilion>, StoreError> {
        self.list_pavilions_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_pavilions.load(Ordering::SeqCst) {
            return Err(failure());
        }
        Ok(self.pavilions.lock().unwrap().clone())
    }

    async fn get_pavilion(&self, id: i64) -> Result<Option<Pavilion>, StoreError> {
        self.get_pavilion_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_pavilions.load(Ordering::SeqCst) {
            return Err(failure());
        }
        Ok(self.pavilions.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn list_reviews(&self, pavilion_id: Option<i64>) -> Result<Vec<Review>, StoreError> {
        self.list_reviews_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reviews.load(Ordering::SeqCst) {
            return Err(failure());
        }
        let mut reviews: Vec<Review> = self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| pavilion_id.map_or(true, |id| r.pavilion_id == id))
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(reviews)
    }

    async fn insert_review(&self, record: &NewReview) -> Result<Review, StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        // stay pending for one poll, like a real network round trip
        tokio::task::yield_now().await;
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(failure());
        }
        let mut reviews = self.reviews.lock().unwrap();
        let id = reviews.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let review = Review {
            id,
            pavilion_id: record.pavilion_id,
            name: Some(record.name.clone()),
            comment: record.comment.clone(),
            again: Some(record.again),
            created_at: Utc::now(),
        };
        reviews.push(review.clone());
        Ok(review)
    }
}
