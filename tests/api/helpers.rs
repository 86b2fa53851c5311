use std::net::TcpListener;

use httpmock::MockServer;
use orgscope::{
    configuration::{ApolloSettings, ApplicationSettings, ContactsFailurePolicy},
    services::ApolloClient,
    startup::run,
};
use serde_json::Value;

pub const TEST_API_KEY: &str = "test-api-key";

pub struct TestApp {
    pub address: String,
    pub apollo_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_enrich(&self, body: &Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/organizations/enrich", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_contacts(&self, organization_id: &str) -> reqwest::Response {
        self.api_client
            .get(format!(
                "{}/organizations/{}/contacts",
                self.address, organization_id
            ))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_export(&self, body: &Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/organizations/export", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(ContactsFailurePolicy::BestEffort, Some(TEST_API_KEY)).await
}

pub async fn spawn_app_with(policy: ContactsFailurePolicy, api_key: Option<&str>) -> TestApp {
    let apollo_server = MockServer::start_async().await;

    let apollo_settings = ApolloSettings {
        base_url: apollo_server.base_url(),
        api_key: api_key.map(str::to_string),
        contacts_per_page: 10,
        contacts_failure_policy: policy,
    };
    let application = ApplicationSettings {
        host: "127.0.0.1".into(),
        port: 0,
        api_prefix: "".into(),
        static_dir: None,
    };

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let server = run(
        listener,
        ApolloClient::new(&apollo_settings),
        apollo_settings.contacts_failure_policy,
        application,
    )
    .expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        apollo_server,
        api_client: reqwest::Client::new(),
    }
}
