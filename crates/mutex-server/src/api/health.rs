use actix_web::HttpResponse;

/// GET /health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().finish()
}
