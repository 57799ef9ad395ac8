use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use super::PavilionStore;
use crate::error::StoreError;
use crate::models::pavilion::Pavilion;
use crate::models::review::{NewReview, Review};

/// Browser-side store: talks to the server's JSON API with `fetch`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new("/api")
    }
}

impl ApiClient {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

async fn parse_json<R: DeserializeOwned>(response: Response) -> Result<R, StoreError> {
    if !response.ok() {
        return Err(StoreError::Status {
            status: response.status(),
            body: response.text().await.unwrap_or_default(),
        });
    }
    Ok(response.json::<R>().await?)
}

#[async_trait(?Send)]
impl PavilionStore for ApiClient {
    async fn list_pavilions(&self) -> Result<Vec<Pavilion>, StoreError> {
        let response = Request::get(&self.url("/pavilions")).send().await?;
        parse_json(response).await
    }

    async fn get_pavilion(&self, id: i64) -> Result<Option<Pavilion>, StoreError> {
        let response = Request::get(&self.url(&format!("/pavilions/{}", id)))
            .send()
            .await?;
        if response.status() == 404 {
            return Ok(None);
        }
        parse_json(response).await.map(Some)
    }

    async fn list_reviews(&self, pavilion_id: Option<i64>) -> Result<Vec<Review>, StoreError> {
        let path = match pavilion_id {
            Some(id) => format!("/reviews?pavilion_id={}", id),
            None => "/reviews".to_string(),
        };
        let response = Request::get(&self.url(&path)).send().await?;
        parse_json(response).await
    }

    async fn insert_review(&self, record: &NewReview) -> Result<Review, StoreError> {
        let response = Request::post(&self.url("/reviews"))
            .json(record)?
            .send()
            .await?;
        parse_json(response).await
    }
}
