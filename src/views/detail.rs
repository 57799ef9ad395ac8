use leptos::logging::{error, log};
use leptos::{RwSignal, SignalUpdate};

use crate::aggregate::{summary, NO_RATINGS};
use crate::error::StoreError;
use crate::models::pavilion::Pavilion;
use crate::models::review::{NewReview, Review};
use crate::store::PavilionStore;

/// Notice shown when the store rejects or loses a submission.
pub const SUBMIT_FAILED: &str = "Failed to submit review. Please try again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailStatus {
    #[default]
    Loading,
    NotFound,
    Ready,
}

/// Detail page state: one pavilion and its reviews, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detail {
    status: DetailStatus,
    pavilion: Option<Pavilion>,
    reviews: Vec<Review>,
}

impl Detail {
    pub fn not_found() -> Self {
        Detail {
            status: DetailStatus::NotFound,
            ..Default::default()
        }
    }

    /// Fetches the pavilion, then its reviews. Reviews are not requested for
    /// an unknown pavilion. A failed pavilion read renders as not found.
    pub async fn load(store: &dyn PavilionStore, pavilion_id: i64) -> Self {
        let pavilion = match store.get_pavilion(pavilion_id).await {
            Ok(Some(pavilion)) => pavilion,
            Ok(None) => {
                log!("[DETAIL] Pavilion {} not found", pavilion_id);
                return Detail::not_found();
            }
            Err(err) => {
                error!("[DETAIL] Failed to load pavilion {}: {}", pavilion_id, err);
                return Detail::not_found();
            }
        };

        let reviews = store
            .list_reviews(Some(pavilion_id))
            .await
            .unwrap_or_else(|err| {
                error!("[DETAIL] Failed to load reviews for {}: {}", pavilion_id, err);
                Vec::new()
            });

        Detail {
            status: DetailStatus::Ready,
            pavilion: Some(pavilion),
            reviews,
        }
    }

    pub fn status(&self) -> DetailStatus {
        self.status
    }

    pub fn pavilion(&self) -> Option<&Pavilion> {
        self.pavilion.as_ref()
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn summary(&self) -> String {
        match &self.pavilion {
            Some(pavilion) => summary(pavilion.id, &self.reviews),
            None => NO_RATINGS.to_string(),
        }
    }

    /// Shows a freshly created review at the top of the list.
    pub fn prepend(&mut self, review: Review) {
        let belongs = self.pavilion.as_ref().map(|p| p.id) == Some(review.pavilion_id);
        if belongs && !self.reviews.iter().any(|r| r.id == review.id) {
            self.reviews.insert(0, review);
        }
    }
}

/// Contents and submit state of one review form.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft {
    pavilion_id: i64,
    name: String,
    comment: String,
    again: Option<bool>,
    in_flight: bool,
    notice: Option<String>,
}

impl ReviewDraft {
    pub fn new(pavilion_id: i64) -> Self {
        ReviewDraft {
            pavilion_id,
            name: String::new(),
            comment: String::new(),
            again: None,
            in_flight: false,
            notice: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn set_comment(&mut self, comment: String) {
        self.comment = comment;
    }

    pub fn again(&self) -> Option<bool> {
        self.again
    }

    pub fn set_again(&mut self, again: bool) {
        self.again = Some(again);
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Comment present, flag chosen, nothing outstanding.
    pub fn can_submit(&self) -> bool {
        !self.in_flight && self.again.is_some() && !self.comment.trim().is_empty()
    }

    /// Claims the form for one submission. Returns the record to insert, or
    /// `None` if the form is incomplete or a submission is already outstanding.
    pub fn begin(&mut self) -> Option<NewReview> {
        if !self.can_submit() {
            return None;
        }
        let record = NewReview::new(self.pavilion_id, &self.name, &self.comment, self.again?).ok()?;
        self.in_flight = true;
        self.notice = None;
        Some(record)
    }

    /// Releases the form. On success the inputs are cleared and the stored
    /// review returned; on failure the inputs stay and a notice is set.
    pub fn finish(&mut self, result: Result<Review, StoreError>) -> Option<Review> {
        self.in_flight = false;
        match result {
            Ok(review) => {
                self.name.clear();
                self.comment.clear();
                self.again = None;
                self.notice = None;
                Some(review)
            }
            Err(err) => {
                error!("[DETAIL] Review submission failed: {}", err);
                self.notice = Some(SUBMIT_FAILED.to_string());
                None
            }
        }
    }
}

/// Runs one submission for the form held in `draft`. The draft stays claimed
/// while the insert is outstanding, so overlapping calls insert once.
/// The stored review is returned even if the form was closed meanwhile.
pub async fn submit_review(draft: RwSignal<ReviewDraft>, store: &dyn PavilionStore) -> Option<Review> {
    let record = draft.try_update(ReviewDraft::begin).flatten()?;
    let result = store.insert_review(&record).await;
    let created = result.as_ref().ok().cloned();
    if draft.try_update(|d| d.finish(result)).is_none() {
        log!("[DETAIL] Review form closed before the insert finished");
    }
    created
}
