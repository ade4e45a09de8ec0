//! # Módulo HTTP
//!
//! Este módulo formatea respuestas HTTP: a partir de un payload o de un error
//! deriva el status, la reason phrase, el body serializado y los headers, y
//! finaliza el sink exactamente una vez.
//!
//! - Tabla de status codes y reason phrases
//! - Registro cerrado de modos (html, js, json, text)
//! - Normalización de errores y serialización del body
//! - Aplicación de headers sobre un sink abstracto
//! - Builder con campos de escritura única y finalización única
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.0 404 Not Found\r\n
//! Content-Type: application/json; charset=utf-8\r\n
//! Content-Length: 34\r\n
//! \r\n
//! {"code":404,"message":"Not Found"}
//! ```

pub mod body;       // Serialización del body por modo
pub mod builder;    // Orquestación y finalización
pub mod error;      // Tipo de error del crate
pub mod finalizer;  // Escritura terminal única
pub mod headers;    // Aplicación de headers sobre el sink
pub mod mode;       // Registro de modos
pub mod normalize;  // Normalización de errores
pub mod once;       // Campos de escritura única
pub mod options;    // Entrada del builder
pub mod response;   // Sink en memoria
pub mod sink;       // Trait del sink y sink sobre Write
pub mod status;     // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use body::{coerce_to_text, serialize_body, SerializedBody};
pub use builder::{DerivedState, ResponseBuilder, ResponseSnapshot};
pub use error::ResponseError;
pub use finalizer::{Completion, Finalizer};
pub use headers::{header_text, is_field_text, is_token, validate_headers, HeaderManager, CONTENT_LENGTH};
pub use mode::{Mode, ModeTemplate};
pub use normalize::{normalize, ErrorDescriptor, Normalized, SinkStatus};
pub use once::WriteOnce;
pub use options::ResponseOptions;
pub use response::Response;
pub use sink::{ResponseSink, StreamSink};
pub use status::StatusCode;
