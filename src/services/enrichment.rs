use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    configuration::ContactsFailurePolicy,
    domain::{
        Contact, ContactsResponse, EnrichmentRequest, EnrichmentResponse, Organization, SearchType,
    },
    error::ApiError,
};

use super::ApolloClient;

pub async fn enrich_organizations(
    client: &ApolloClient,
    request: &EnrichmentRequest,
) -> Result<EnrichmentResponse, ApiError> {
    let domains = request.lookup_domains();

    match request.search_type() {
        SearchType::Single => {
            log::info!("Enriching single organization for {}", domains[0]);
            let envelope = client.enrich_organization(&domains[0]).await?;
            Ok(normalize_single_enrichment(envelope))
        }
        SearchType::Bulk => {
            log::info!("Bulk enriching {} domains", domains.len());
            let envelope = client.bulk_enrich_organizations(domains).await?;
            Ok(normalize_bulk_enrichment(envelope))
        }
    }
}

/// Looks up the contacts of one organization.
///
/// Upstream failures follow `policy`. A missing credential is always an error,
/// whatever the policy, so a misconfigured deployment never looks healthy.
pub async fn fetch_contacts(
    client: &ApolloClient,
    organization_id: &str,
    policy: ContactsFailurePolicy,
) -> Result<ContactsResponse, ApiError> {
    log::info!("Searching people for organization {}", organization_id);

    match client.search_people(organization_id).await {
        Ok(envelope) => Ok(normalize_people(envelope, organization_id)),
        Err(e @ ApiError::Upstream { .. }) if policy == ContactsFailurePolicy::BestEffort => {
            log::warn!(
                "People search failed for organization {}, answering with no contacts: {}",
                organization_id,
                e
            );
            Ok(ContactsResponse::default())
        }
        Err(e) => Err(e),
    }
}

/// `{ "organization": {..} }` becomes a one element list, anything else an empty one.
pub fn normalize_single_enrichment(mut envelope: Value) -> EnrichmentResponse {
    let organizations = match envelope.get_mut("organization").map(Value::take) {
        Some(Value::Null) | None => vec![],
        Some(record) => parse_record::<Organization>(record).into_iter().collect(),
    };
    EnrichmentResponse { organizations }
}

pub fn normalize_bulk_enrichment(mut envelope: Value) -> EnrichmentResponse {
    let organizations = take_array(&mut envelope, "organizations")
        .into_iter()
        .filter(|record| !record.is_null())
        .filter_map(parse_record::<Organization>)
        .collect();
    EnrichmentResponse { organizations }
}

/// People without an `organization_id` inherit the one they were searched under.
pub fn normalize_people(mut envelope: Value, organization_id: &str) -> ContactsResponse {
    let contacts = take_array(&mut envelope, "people")
        .into_iter()
        .filter(|record| !record.is_null())
        .map(|mut record| {
            if let Some(person) = record.as_object_mut() {
                let scoped = person
                    .get("organization_id")
                    .is_some_and(|id| !id.is_null());
                if !scoped {
                    person.insert(
                        "organization_id".to_string(),
                        Value::String(organization_id.to_string()),
                    );
                }
            }
            record
        })
        .filter_map(parse_record::<Contact>)
        .collect();
    ContactsResponse { contacts }
}

fn take_array(envelope: &mut Value, key: &str) -> Vec<Value> {
    match envelope.get_mut(key).map(Value::take) {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => vec![],
        Some(other) => {
            log::warn!("Ignoring `{}` field that is not an array: {}", key, other);
            vec![]
        }
    }
}

fn parse_record<T: DeserializeOwned>(record: Value) -> Option<T> {
    match serde_json::from_value::<T>(record) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            log::warn!(
                "Dropping {} record that does not match the contract: {}",
                std::any::type_name::<T>().rsplit("::").next().unwrap_or("upstream"),
                e
            );
            None
        }
    }
}
