//! # Logging
//! src/logging.rs
//!
//! Inicializa `tracing-subscriber`. Los eventos van a stderr para que stdout
//! quede libre para el mensaje HTTP.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filtro por defecto si no hay `RUST_LOG`
pub fn default_filter(level: &str) -> String {
    format!("http_responder={}", level)
}

/// Instala el subscriber global
///
/// `RUST_LOG` tiene prioridad sobre `level`. Llamarlo dos veces no falla:
/// la segunda instalación simplemente se ignora.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
