//! # HTTP Responder - Entry Point
//! src/main.rs
//!
//! Arma una respuesta a partir de flags, variables de entorno o un archivo
//! JSON, y escribe el mensaje HTTP/1.0 completo en stdout. Con `--dry-run`
//! imprime el estado derivado como JSON.

use http_responder::config::Config;
use http_responder::http::{ResponseBuilder, StreamSink};
use http_responder::logging;
use std::io;

fn main() {
    let config = Config::new();
    logging::init(&config.log_level);
    config.log_summary();

    if let Err(e) = run(&config) {
        tracing::error!(error = %e, "cannot format response");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let options = config.to_options()?;

    if config.dry_run {
        let builder = ResponseBuilder::new(options)?;
        println!("{}", serde_json::to_string_pretty(&builder.snapshot())?);
        return Ok(());
    }

    let stdout = io::stdout();
    let mut builder = ResponseBuilder::new(options.with_response(StreamSink::new(stdout.lock())))?;
    tracing::info!(
        status = builder.status_code().as_u16(),
        bytes = builder.bytes(),
        "writing response"
    );
    builder.send()?;
    Ok(())
}
