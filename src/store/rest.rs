//! Client for the hosted table store's PostgREST-style HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use leptos::logging::error;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::PavilionStore;
use crate::error::StoreError;
use crate::models::pavilion::Pavilion;
use crate::models::review::{NewReview, Review};

const PAVILIONS: &str = "pavilions";
const REVIEWS: &str = "reviews";

pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn select_request(&self, table: &str, query: &[(&str, String)]) -> RequestBuilder {
        self.authorized(self.client.get(self.table_url(table)).query(query))
    }

    fn insert_request(&self, record: &NewReview) -> RequestBuilder {
        self.authorized(self.client.post(self.table_url(REVIEWS)))
            .header("Prefer", "return=representation")
            .json(record)
    }

    async fn select<R>(&self, table: &str, query: &[(&str, String)]) -> Result<Vec<R>, StoreError>
    where
        R: DeserializeOwned,
    {
        let response = self.select_request(table, query).send().await?;
        parse_rows(response, table).await
    }
}

/// Helpers to handle HTTP response parsing and error handling
async fn parse_rows<R>(response: Response, table: &str) -> Result<Vec<R>, StoreError>
where
    R: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!("[STORE] {} request to {} failed: {}", status, table, body);
        return Err(StoreError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json::<Vec<R>>().await?)
}

/// The insert answers with the stored rows; exactly one is expected.
async fn parse_inserted(response: Response) -> Result<Review, StoreError> {
    let rows: Vec<Review> = parse_rows(response, REVIEWS).await?;
    rows.into_iter()
        .next()
        .ok_or_else(|| StoreError::Decode("insert returned no rows".to_string()))
}

fn pavilions_query(id: Option<i64>) -> Vec<(&'static str, String)> {
    let mut query = vec![("select", "*".to_string())];
    match id {
        Some(id) => {
            query.push(("id", format!("eq.{}", id)));
            query.push(("limit", "1".to_string()));
        }
        None => query.push(("order", "id.asc".to_string())),
    }
    query
}

fn reviews_query(pavilion_id: Option<i64>) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("select", "*".to_string()),
        ("order", "created_at.desc,id.desc".to_string()),
    ];
    if let Some(pavilion_id) = pavilion_id {
        query.push(("pavilion_id", format!("eq.{}", pavilion_id)));
    }
    query
}

#[async_trait(?Send)]
impl PavilionStore for RestStore {
    async fn list_pavilions(&self) -> Result<Vec<Pavilion>, StoreError> {
        self.select(PAVILIONS, &pavilions_query(None)).await
    }

    async fn get_pavilion(&self, id: i64) -> Result<Option<Pavilion>, StoreError> {
        let rows: Vec<Pavilion> = self.select(PAVILIONS, &pavilions_query(Some(id))).await?;
        Ok(rows.into_iter().next())
    }

    async fn list_reviews(&self, pavilion_id: Option<i64>) -> Result<Vec<Review>, StoreError> {
        self.select(REVIEWS, &reviews_query(pavilion_id)).await
    }

    async fn insert_review(&self, record: &NewReview) -> Result<Review, StoreError> {
        let record = record.clone().validated()?;
        let response = self.insert_request(&record).send().await?;
        parse_inserted(response).await
    }
}
