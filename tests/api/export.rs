use serde_json::{json, Value};

use crate::helpers::spawn_app;

#[tokio::test]
async fn export_returns_csv_attachment_with_dated_filename() {
    let app = spawn_app().await;

    let response = app
        .post_export(&json!({
            "organizations": [
                {
                    "id": "1",
                    "name": "Stripe",
                    "website_url": "http://www.stripe.com",
                    "city": "South San Francisco",
                    "state": "California",
                    "industry": "financial services",
                    "estimated_num_employees": 8000
                },
                { "id": "2", "name": "Say \"Hi\" Ltd" }
            ]
        }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/csv"));

    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let disposition = response.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains(&format!("organizations_{}.csv", today)));

    let body = response.text().await.unwrap();
    assert!(!body.ends_with('\n'));
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(
        lines,
        vec![
            "\"Name\",\"Website\",\"City\",\"State\",\"Industry\",\"Employees\",\"Revenue\"",
            "\"Stripe\",\"http://www.stripe.com\",\"South San Francisco\",\"California\",\"financial services\",\"8000\",\"\"",
            "\"Say \"\"Hi\"\" Ltd\",\"\",\"\",\"\",\"\",\"\",\"\"",
        ]
    );
}

#[tokio::test]
async fn export_rejects_a_body_without_organizations() {
    let app = spawn_app().await;

    let response = app.post_export(&json!({ "orgs": [] })).await;

    assert_eq!(response.status().as_u16(), 400);
    let error: Value = response.json().await.unwrap();
    assert_eq!(error["error"], "VALIDATION_ERROR");
}
