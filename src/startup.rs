use std::net::TcpListener;

use actix_files::Files;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    configuration::{ApplicationSettings, ContactsFailurePolicy},
    error::{ApiError, ValidationError},
    routes::{health_route, organization_route},
    services::ApolloClient,
};

pub fn run(
    listener: TcpListener,
    apollo_client: ApolloClient,
    contacts_policy: ContactsFailurePolicy,
    application: ApplicationSettings,
) -> Result<Server, std::io::Error> {
    let apollo_client = web::Data::new(apollo_client);
    let contacts_policy = web::Data::new(contacts_policy);

    // Malformed JSON and wrong content types answer like any other contract violation.
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::from(ValidationError::new(format!("Invalid request body: {}", err))).into()
    });

    if application.static_dir.is_some() && application.api_prefix.is_empty() {
        log::warn!("static_dir is set but api_prefix is empty; the API scope will shadow static files");
    }

    let server = HttpServer::new(move || {
        let app = App::new()
            .wrap(Logger::default())
            .app_data(json_config.clone())
            .app_data(apollo_client.clone())
            .app_data(contacts_policy.clone())
            .service(
                web::scope(&application.api_prefix)
                    .service(health_route::health)
                    .service(organization_route::enrich)
                    .service(organization_route::export)
                    .service(organization_route::contacts),
            );

        match &application.static_dir {
            Some(dir) => app.service(Files::new("/", dir).index_file("index.html")),
            None => app,
        }
    })
    .listen(listener)?
    .run();

    Ok(server)
}
