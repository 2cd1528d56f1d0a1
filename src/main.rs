use std::sync::Arc;

use actix_web::{App, HttpServer, web::Data};
use email_verifier::config::AppConfig;
use email_verifier::openapi::ApiDoc;
use email_verifier::validation::disposable::DisposableRegistry;
use email_verifier::validation::dnsmx::DnsDomainResolver;
use email_verifier::validation::pipeline::ValidationPipeline;
use tracing_subscriber::{EnvFilter, fmt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Email Verifier Service Entry Point
///
/// Configures and launches the Actix-web HTTP server with:
/// - The email validation pipeline shared as application state
/// - Swagger UI for API documentation
/// - Environment configuration via `.env` file
///
/// # Endpoints
/// - Validation: `POST /api/v1/validate-email`
/// - Health: `GET /api/v1/health`
/// - Swagger UI: `/swagger-ui/`
/// - OpenAPI spec: `/api-docs/openapi.json`
///
/// # Configuration
/// - Server binds to `127.0.0.1:8080` by default (`HOST`/`PORT`)
/// - Validation policy via `DNS_TIMEOUT_SECS`, `REJECT_DISPOSABLE`,
///   `REQUIRE_MX` and `DISPOSABLE_DOMAINS_FILE`
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env();

    let registry = match &config.disposable_domains_file {
        Some(path) => Arc::new(DisposableRegistry::from_file(path).map_err(std::io::Error::other)?),
        None => Arc::new(DisposableRegistry::with_defaults()),
    };
    tracing::info!(domains = registry.len(), "disposable domain registry loaded");

    let resolver = Arc::new(DnsDomainResolver::new(config.validation.dns_timeout));
    let pipeline = Data::new(ValidationPipeline::new(
        resolver,
        registry,
        config.validation,
    ));

    tracing::info!(
        host = %config.host,
        port = config.port,
        dns_timeout_secs = config.validation.dns_timeout.as_secs(),
        reject_disposable = config.validation.reject_disposable,
        require_mx = config.validation.require_mx,
        "starting email verifier"
    );

    HttpServer::new(move || {
        let openapi = ApiDoc::openapi();

        App::new()
            .app_data(Data::new(openapi.clone()))
            .app_data(pipeline.clone())
            .configure(email_verifier::routes::configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
