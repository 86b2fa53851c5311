use httpmock::prelude::*;
use orgscope::configuration::ContactsFailurePolicy;
use serde_json::{json, Value};

use crate::helpers::{spawn_app, spawn_app_with, TEST_API_KEY};

#[tokio::test]
async fn contacts_are_searched_by_organization_id() {
    let app = spawn_app().await;
    let upstream = app
        .apollo_server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/mixed_people/search")
                .header("x-api-key", TEST_API_KEY)
                .json_body(json!({ "organization_ids": ["org1"], "page": 1, "per_page": 10 }));
            then.status(200).json_body(json!({
                "people": [
                    {
                        "id": "p1",
                        "name": "Ada Lovelace",
                        "title": "CTO",
                        "organization_id": "org1",
                        "linkedin_url": "https://linkedin.com/in/ada"
                    },
                    { "id": "p2", "name": "Grace Hopper" }
                ]
            }));
        })
        .await;

    let response = app.get_contacts("org1").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "contacts": [
                {
                    "id": "p1",
                    "name": "Ada Lovelace",
                    "title": "CTO",
                    "organization_id": "org1",
                    "linkedin_url": "https://linkedin.com/in/ada"
                },
                { "id": "p2", "name": "Grace Hopper", "organization_id": "org1" }
            ]
        })
    );
    upstream.assert_async().await;
}

#[tokio::test]
async fn missing_people_field_yields_no_contacts() {
    let app = spawn_app().await;
    app.apollo_server
        .mock_async(|when, then| {
            when.method(POST).path("/mixed_people/search");
            then.status(200).json_body(json!({ "pagination": { "page": 1 } }));
        })
        .await;

    let response = app.get_contacts("1").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "contacts": [] }));
}

#[tokio::test]
async fn best_effort_policy_swallows_upstream_failures() {
    let app = spawn_app().await;
    let upstream = app
        .apollo_server
        .mock_async(|when, then| {
            when.method(POST).path("/mixed_people/search");
            then.status(403)
                .json_body(json!({ "error": "api/v1/mixed_people/search is not accessible with this api_key" }));
        })
        .await;

    let response = app.get_contacts("org1").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "contacts": [] }));
    upstream.assert_hits_async(1).await;
}

#[tokio::test]
async fn propagate_policy_surfaces_upstream_failures() {
    let app = spawn_app_with(ContactsFailurePolicy::Propagate, Some(TEST_API_KEY)).await;
    app.apollo_server
        .mock_async(|when, then| {
            when.method(POST).path("/mixed_people/search");
            then.status(500);
        })
        .await;

    let response = app.get_contacts("org1").await;

    assert_eq!(response.status().as_u16(), 502);
    let error: Value = response.json().await.unwrap();
    assert_eq!(error["error"], "UPSTREAM_ERROR");
    assert_eq!(error["upstream_status"], 500);
}

#[tokio::test]
async fn missing_api_key_is_reported_even_under_best_effort() {
    let app = spawn_app_with(ContactsFailurePolicy::BestEffort, None).await;
    let upstream = app
        .apollo_server
        .mock_async(|_when, then| {
            then.status(200).json_body(json!({ "people": [] }));
        })
        .await;

    let response = app.get_contacts("org1").await;

    assert_eq!(response.status().as_u16(), 500);
    let error: Value = response.json().await.unwrap();
    assert_eq!(error["error"], "CONFIGURATION_ERROR");
    upstream.assert_hits_async(0).await;
}

#[tokio::test]
async fn unknown_person_fields_are_passed_through() {
    let app = spawn_app().await;
    app.apollo_server
        .mock_async(|when, then| {
            when.method(POST).path("/mixed_people/search");
            then.status(200).json_body(json!({
                "people": [{
                    "id": "p1",
                    "name": "Ada Lovelace",
                    "organization_id": "org1",
                    "headline": "Analyst of engines",
                    "seniority": "c_suite"
                }]
            }));
        })
        .await;

    let response = app.get_contacts("org1").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["contacts"][0]["headline"], "Analyst of engines");
    assert_eq!(body["contacts"][0]["seniority"], "c_suite");
}

#[tokio::test]
async fn blank_organization_id_is_rejected_without_calling_upstream() {
    let app = spawn_app().await;
    let upstream = app
        .apollo_server
        .mock_async(|_when, then| {
            then.status(200).json_body(json!({ "people": [] }));
        })
        .await;

    let response = app.get_contacts("%20").await;

    assert_eq!(response.status().as_u16(), 400);
    let error: Value = response.json().await.unwrap();
    assert_eq!(error["error"], "VALIDATION_ERROR");
    upstream.assert_hits_async(0).await;
}
