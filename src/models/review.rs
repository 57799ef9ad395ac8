// src/models/review.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ReviewError;

/// Name stored and displayed for reviews submitted without one.
pub const ANONYMOUS: &str = "anonymous";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i64,                    // Assigned by the store
    pub pavilion_id: i64,           // ID of the pavilion the review is about
    #[serde(default)]
    pub name: Option<String>,       // Reviewer name, may be missing on older rows
    pub comment: String,            // Content of the review
    #[serde(default)]
    pub again: Option<bool>,        // "Would return"; None on rows that never tracked it
    pub created_at: DateTime<Utc>,  // Assigned by the store
}

impl Review {
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => ANONYMOUS,
        }
    }
}

/// A review as submitted, before the store assigns `id` and `created_at`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewReview {
    pub pavilion_id: i64,
    #[serde(default)]
    pub name: String,
    pub comment: String,
    pub again: bool,
}

impl NewReview {
    /// Builds a record ready for insertion. The comment is trimmed and must not
    /// be empty; a blank name becomes [`ANONYMOUS`].
    pub fn new(pavilion_id: i64, name: &str, comment: &str, again: bool) -> Result<Self, ReviewError> {
        NewReview {
            pavilion_id,
            name: name.to_string(),
            comment: comment.to_string(),
            again,
        }
        .validated()
    }

    /// Normalizes a record received from elsewhere (e.g. an API request body).
    pub fn validated(self) -> Result<Self, ReviewError> {
        let comment = self.comment.trim();
        if comment.is_empty() {
            return Err(ReviewError::EmptyComment);
        }
        let name = match self.name.trim() {
            "" => ANONYMOUS.to_string(),
            name => name.to_string(),
        };
        Ok(NewReview {
            pavilion_id: self.pavilion_id,
            name,
            comment: comment.to_string(),
            again: self.again,
        })
    }
}
