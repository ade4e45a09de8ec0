//! # HTTP Responder
//! src/lib.rs
//!
//! Componente de formateo de respuestas HTTP: dado un payload o un error,
//! deriva status code, reason phrase, body serializado y un conjunto coherente
//! de headers, y finaliza el sink subyacente exactamente una vez.
//!
//! ## Arquitectura
//!
//! El crate está dividido en módulos especializados:
//! - `http`: Status codes, modos, normalización, headers, builder y sinks
//! - `config`: Configuración por CLI y variables de entorno
//! - `logging`: Inicialización de `tracing`
//!
//! ## Ejemplo de uso
//!
//! ```
//! use http_responder::http::{ResponseBuilder, ResponseOptions, StreamSink};
//!
//! let options = ResponseOptions::new()
//!     .with_data("hola")
//!     .with_mode("text")
//!     .with_response(StreamSink::new(Vec::new()));
//!
//! let mut builder = ResponseBuilder::new(options).unwrap();
//! let sink = builder.send().unwrap().unwrap();
//! let wire = String::from_utf8(sink.into_inner()).unwrap();
//! assert!(wire.starts_with("HTTP/1.0 200 OK\r\n"));
//! ```

pub mod config;
pub mod http;
pub mod logging;
