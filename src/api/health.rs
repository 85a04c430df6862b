use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::store::Store;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "OK")]
    pub status: String,
    #[schema(example = "Dashboard API Server Running")]
    pub message: String,
    /// Backend currently serving requests
    #[schema(example = "mysql")]
    pub storage: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health(store: web::Data<dyn Store>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: "Dashboard API Server Running".to_string(),
        storage: store.backend().to_string(),
    })
}

pub async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "Route not found"
    }))
}
