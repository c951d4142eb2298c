use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use auth_relay::{register_routes, AppState, Config, OnboardingService};
use std::sync::Arc;
use tribes_common::{init_tracing, load_dotenv, serve_metrics, Environment, MetricsMiddleware};

#[actix_web::main]
async fn main() -> Result<()> {
    load_dotenv();
    init_tracing(Environment::from_env());

    tracing::info!("Starting auth relay");

    // Missing Privy credentials end the process here, before the port is bound
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {:#}", e);
            return Err(e).context("Failed to load configuration");
        }
    };

    let privy_client = config.privy.build_client();

    tracing::info!(
        app_id = %privy_client.app_id(),
        api_url = %config.privy.api_url,
        wallet_chain_type = %config.privy.wallet_chain_type,
        environment = config.app.env.as_str(),
        "Privy client initialized"
    );

    let environment = config.app.env;
    let state = web::Data::new(AppState {
        onboarding: OnboardingService::new(
            Arc::new(privy_client),
            config.privy.wallet_chain_type.clone(),
        ),
        environment,
        port: config.app.port,
        privy_app_id_configured: true,
        privy_app_secret_configured: true,
        privy_api_url: config.privy.api_url.clone(),
    });

    let addr = ("0.0.0.0", config.app.port);
    tracing::info!("Server listening on port {}", config.app.port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .wrap(Cors::permissive())
            .wrap(MetricsMiddleware::new("auth-relay"))
            .route("/metrics", web::get().to(serve_metrics))
            .configure(move |cfg| register_routes(cfg, environment))
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
