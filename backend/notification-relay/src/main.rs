use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use notification_relay::{register_routes, Config, NotificationDispatcher};
use std::sync::Arc;
use tribes_common::{init_tracing, load_dotenv, serve_metrics, Environment, MetricsMiddleware};

#[actix_web::main]
async fn main() -> Result<()> {
    load_dotenv();
    init_tracing(Environment::from_env());

    tracing::info!("Starting notification relay");

    let config = Config::from_env().context("Failed to load configuration")?;

    // Startup errors end the process here, before the port is bound
    let fcm_client = match config.fcm.build_client() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("FCM initialization failed: {:#}", e);
            return Err(e);
        }
    };

    tracing::info!(
        project_id = %fcm_client.project_id(),
        topic_prefix = %config.fcm.topic_prefix,
        environment = config.app.env.as_str(),
        "FCM client initialized"
    );

    let dispatcher = web::Data::new(NotificationDispatcher::new(
        Arc::new(fcm_client),
        config.fcm.topic_prefix.clone(),
    ));

    let addr = ("0.0.0.0", config.app.port);
    tracing::info!("Server listening on port {}", config.app.port);

    HttpServer::new(move || {
        App::new()
            .app_data(dispatcher.clone())
            .wrap(middleware::Logger::default())
            .wrap(Cors::permissive())
            .wrap(MetricsMiddleware::new("notification-relay"))
            .route("/metrics", web::get().to(serve_metrics))
            .configure(register_routes)
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
