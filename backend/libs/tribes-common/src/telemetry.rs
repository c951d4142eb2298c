use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::environment::Environment;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. Production logs are JSON lines.
pub fn init_tracing(environment: Environment) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,actix_web=info".into());

    let registry = tracing_subscriber::registry().with(filter);

    if environment.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(false))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
