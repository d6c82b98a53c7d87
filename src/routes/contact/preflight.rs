use actix_web::HttpResponse;

/// Answers a cross-origin preflight. The CORS headers themselves are added by
/// the middleware wrapping every response.
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(serde_json::json!({
        "error": "Method not allowed"
    }))
}
