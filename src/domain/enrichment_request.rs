use serde_json::Value;

use crate::domain::CompanyDomain;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    Single,
    Bulk,
}

impl SearchType {
    pub fn parse(raw: &str) -> Result<SearchType, ValidationError> {
        match raw {
            "single" => Ok(SearchType::Single),
            "bulk" => Ok(SearchType::Bulk),
            other => Err(ValidationError::new(format!(
                "searchType must be either \"single\" or \"bulk\", got \"{}\"",
                other
            ))),
        }
    }
}

/// A validated enrichment request. Always holds at least one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentRequest {
    domains: Vec<CompanyDomain>,
    search_type: SearchType,
}

impl EnrichmentRequest {
    pub fn new(
        domains: Vec<CompanyDomain>,
        search_type: SearchType,
    ) -> Result<EnrichmentRequest, ValidationError> {
        if domains.is_empty() {
            return Err(ValidationError::new("At least one domain is required"));
        }
        Ok(EnrichmentRequest {
            domains,
            search_type,
        })
    }

    pub fn search_type(&self) -> SearchType {
        self.search_type
    }

    /// The domains that are actually sent upstream. A single lookup only ever uses the first one.
    pub fn lookup_domains(&self) -> &[CompanyDomain] {
        match self.search_type {
            SearchType::Single => &self.domains[..1],
            SearchType::Bulk => &self.domains,
        }
    }
}

/// Checks a raw `{ domains, searchType }` body against the request contract.
pub fn validate_enrichment_request(input: &Value) -> Result<EnrichmentRequest, ValidationError> {
    let body = input
        .as_object()
        .ok_or_else(|| ValidationError::new("Request body must be a JSON object"))?;

    let raw_domains = match body.get("domains") {
        None | Some(Value::Null) => {
            return Err(ValidationError::new("At least one domain is required"))
        }
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ValidationError::new("domains must be an array of strings")),
    };
    if raw_domains.is_empty() {
        return Err(ValidationError::new("At least one domain is required"));
    }

    let domains = raw_domains
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(raw) => CompanyDomain::parse(raw)
                .map_err(|e| ValidationError::new(format!("domains[{}]: {}", index, e))),
            _ => Err(ValidationError::new(format!(
                "domains[{}] must be a string",
                index
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let search_type = match body.get("searchType") {
        Some(Value::String(raw)) => SearchType::parse(raw)?,
        Some(_) | None => {
            return Err(ValidationError::new(
                "searchType must be either \"single\" or \"bulk\"",
            ))
        }
    };

    EnrichmentRequest::new(domains, search_type)
}
