use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;

use crate::{configuration::ApolloSettings, domain::CompanyDomain, error::ApiError};

/// Thin client for the Apollo organization data API.
///
/// Every method makes exactly one HTTP call and returns the raw JSON envelope;
/// reshaping it is left to the enrichment service.
#[derive(Clone)]
pub struct ApolloClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    contacts_per_page: u32,
}

#[derive(Serialize)]
struct EnrichQuery<'a> {
    domain: &'a str,
}

#[derive(Serialize)]
struct PeopleSearchBody<'a> {
    organization_ids: [&'a str; 1],
    page: u32,
    per_page: u32,
}

impl ApolloClient {
    pub fn new(settings: &ApolloSettings) -> Self {
        ApolloClient {
            client: Client::new(),
            api_key: settings
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            contacts_per_page: settings.contacts_per_page,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// `GET /organizations/enrich?domain=<domain>`
    pub async fn enrich_organization(&self, domain: &CompanyDomain) -> Result<Value, ApiError> {
        let request = self
            .request(Method::GET, "/organizations/enrich")?
            .query(&EnrichQuery {
                domain: domain.as_str(),
            });
        self.send(request).await
    }

    /// `POST /organizations/bulk_enrich?domains[]=<a>&domains[]=<b>`
    pub async fn bulk_enrich_organizations(
        &self,
        domains: &[CompanyDomain],
    ) -> Result<Value, ApiError> {
        let query: Vec<(&str, &str)> = domains.iter().map(|d| ("domains[]", d.as_str())).collect();
        let request = self
            .request(Method::POST, "/organizations/bulk_enrich")?
            .query(&query);
        self.send(request).await
    }

    /// `POST /mixed_people/search` filtered to a single organization.
    pub async fn search_people(&self, organization_id: &str) -> Result<Value, ApiError> {
        let request = self
            .request(Method::POST, "/mixed_people/search")?
            .json(&PeopleSearchBody {
                organization_ids: [organization_id],
                page: 1,
                per_page: self.contacts_per_page,
            });
        self.send(request).await
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ApiError::Configuration("Apollo API key is not configured".to_string())
        })?;

        Ok(self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header("accept", "application/json")
            .header("Cache-Control", "no-cache")
            .header("Content-Type", "application/json")
            .header("x-api-key", api_key))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request.send().await.map_err(|e| {
            ApiError::upstream(
                e.status().map(|s| s.as_u16()),
                format!("Apollo API request failed: {}", e),
            )
        })?;

        if !response.status().is_success() {
            return Err(upstream_error_from(response).await);
        }

        let status = response.status().as_u16();
        response.json::<Value>().await.map_err(|e| {
            ApiError::upstream(
                Some(status),
                format!("Apollo API returned an unreadable body: {}", e),
            )
        })
    }
}

async fn upstream_error_from(response: Response) -> ApiError {
    let status = response.status();
    let mut message = format!(
        "Apollo API error: {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    )
    .trim_end()
    .to_string();

    if let Some(detail) = response
        .json::<Value>()
        .await
        .ok()
        .as_ref()
        .and_then(provider_error_message)
    {
        message = format!("{}: {}", message, detail);
    }

    ApiError::upstream(Some(status.as_u16()), message)
}

/// Apollo reports failures as either `{"error": "..."}` or `{"message": "..."}`.
fn provider_error_message(body: &Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_string)
}
