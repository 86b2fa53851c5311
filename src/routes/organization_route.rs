use actix_web::{get, http::header, post, web, HttpResponse};
use chrono::Utc;
use serde_json::Value;

use crate::{
    configuration::ContactsFailurePolicy,
    domain::{validate_enrichment_request, EnrichmentResponse},
    error::{ApiError, ValidationError},
    services::{
        enrich_organizations, export_filename, fetch_contacts, organizations_to_csv,
        ApolloClient,
    },
};

#[post("/organizations/enrich")]
pub async fn enrich(
    apollo_client: web::Data<ApolloClient>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let request = validate_enrichment_request(&body)?;
    let response = enrich_organizations(&apollo_client, &request).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[get("/organizations/{organization_id}/contacts")]
pub async fn contacts(
    apollo_client: web::Data<ApolloClient>,
    policy: web::Data<ContactsFailurePolicy>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let organization_id = path.trim();
    if organization_id.is_empty() {
        return Err(ValidationError::new("Organization id must not be empty").into());
    }

    let response = fetch_contacts(&apollo_client, organization_id, **policy).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[post("/organizations/export")]
pub async fn export(body: web::Json<EnrichmentResponse>) -> Result<HttpResponse, ApiError> {
    let csv = organizations_to_csv(&body.organizations)
        .map_err(|e| ApiError::Internal(format!("Failed to render CSV: {}", e)))?;
    let filename = export_filename(Utc::now().date_naive());

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(csv))
}
