/// Health check handler
use actix_web::HttpResponse;
use chrono::Utc;

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "task-service",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
