use std::net::TcpListener;

use env_logger::Env;
use orgscope::{configuration::get_configuration, services::ApolloClient, startup::run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration()?;
    log::debug!("Loaded configuration: {:?}", configuration);

    let apollo_client = ApolloClient::new(&configuration.apollo);
    if !apollo_client.is_configured() {
        log::warn!(
            "No Apollo API key configured; enrichment requests will fail until APOLLO_API_KEY is set"
        );
    }

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;
    log::info!("Listening on {}", address);

    run(
        listener,
        apollo_client,
        configuration.apollo.contacts_failure_policy,
        configuration.application,
    )?
    .await?;

    Ok(())
}
