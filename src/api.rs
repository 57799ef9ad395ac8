use actix_web::{web, HttpResponse};
use leptos::logging::{error, log};
use serde::Deserialize;

use crate::error::StoreError;
use crate::models::review::NewReview;
use crate::store::SharedStore;

#[derive(Debug, Deserialize)]
pub struct ReviewQuery {
    pub pavilion_id: Option<i64>,
}

/// Registers the JSON API under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/pavilions", web::get().to(list_pavilions)) // GET /api/pavilions
            .route("/pavilions/{id}", web::get().to(get_pavilion)) // GET /api/pavilions/{id}
            .route("/reviews", web::get().to(list_reviews)) // GET /api/reviews?pavilion_id=
            .route("/reviews", web::post().to(create_review)), // POST /api/reviews
    );
}

pub async fn list_pavilions(store: web::Data<SharedStore>) -> HttpResponse {
    match store.list_pavilions().await {
        Ok(pavilions) => {
            log!("[API] Returning {} pavilions", pavilions.len());
            HttpResponse::Ok().json(pavilions)
        }
        Err(err) => {
            error!("[API] Failed to fetch pavilions: {}", err);
            HttpResponse::BadGateway().body("Failed to fetch pavilions")
        }
    }
}

pub async fn get_pavilion(store: web::Data<SharedStore>, id: web::Path<i64>) -> HttpResponse {
    let id = id.into_inner();
    match store.get_pavilion(id).await {
        Ok(Some(pavilion)) => HttpResponse::Ok().json(pavilion),
        Ok(None) => HttpResponse::NotFound().body("Pavilion not found"),
        Err(err) => {
            error!("[API] Failed to fetch pavilion {}: {}", id, err);
            HttpResponse::BadGateway().body("Failed to fetch pavilion")
        }
    }
}

pub async fn list_reviews(
    store: web::Data<SharedStore>,
    query: web::Query<ReviewQuery>,
) -> HttpResponse {
    match store.list_reviews(query.pavilion_id).await {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(err) => {
            error!("[API] Failed to fetch reviews ({:?}): {}", query.pavilion_id, err);
            HttpResponse::BadGateway().body("Failed to fetch reviews")
        }
    }
}

pub async fn create_review(
    store: web::Data<SharedStore>,
    record: web::Json<NewReview>,
) -> HttpResponse {
    let record = match record.into_inner().validated() {
        Ok(record) => record,
        Err(err) => return HttpResponse::BadRequest().body(err.to_string()),
    };
    log!("[API] Received review for pavilion {}", record.pavilion_id);

    match store.insert_review(&record).await {
        Ok(review) => {
            log!("[API] Successfully saved review ID: {}", review.id);
            HttpResponse::Created().json(review)
        }
        Err(StoreError::Invalid(err)) => HttpResponse::BadRequest().body(err.to_string()),
        Err(err) => {
            error!("[API] Failed to save review: {}", err);
            HttpResponse::BadGateway().body("Failed to save review")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pavilion::Pavilion;
    use crate::models::review::Review;
    use crate::store::sqlite::SqliteStore;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use std::sync::Arc;

    async fn test_store() -> SharedStore {
        let store = SqliteStore::new(":memory:").unwrap();
        store.create_schema().await.unwrap();
        store
            .seed_pavilions(&[Pavilion {
                id: 2,
                name: "USA Pavilion".into(),
                description: "Imagine what we can create together".into(),
                image_url: "/pavilion-img/america.jpg".into(),
            }])
            .await
            .unwrap();
        Arc::new(store)
    }

    #[actix_web::test]
    async fn test_get_pavilion_and_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_store().await))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/pavilions/2").to_request();
        let pavilion: Pavilion = test::call_and_read_body_json(&app, req).await;
        assert_eq!(pavilion.name, "USA Pavilion");

        let req = test::TestRequest::get().uri("/api/pavilions/99").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_create_and_list_reviews() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_store().await))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/reviews")
            .set_json(serde_json::json!({
                "pavilion_id": 2,
                "comment": "Great show!",
                "again": true
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Review = test::read_body_json(resp).await;
        assert_eq!(created.name.as_deref(), Some("anonymous"));

        let req = test::TestRequest::get().uri("/api/reviews?pavilion_id=2").to_request();
        let reviews: Vec<Review> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(reviews, vec![created]);
    }

    #[actix_web::test]
    async fn test_create_review_rejects_empty_comment() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_store().await))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/reviews")
            .set_json(serde_json::json!({
                "pavilion_id": 2,
                "name": "Taro",
                "comment": "  ",
                "again": false
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/api/reviews").to_request();
        let reviews: Vec<Review> = test::call_and_read_body_json(&app, req).await;
        assert!(reviews.is_empty());
    }
}
