use actix_web::{get, web, HttpResponse};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::services::ApolloClient;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    apollo_api_configured: bool,
    timestamp: String,
}

#[get("/health")]
pub async fn health(apollo_client: web::Data<ApolloClient>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        apollo_api_configured: apollo_client.is_configured(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
