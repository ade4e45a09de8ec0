//! # Normalización de errores
//!
//! Convierte un descriptor de error opcional en un status concreto, su reason
//! phrase y los datos de la respuesta. Es una función pura.
//!
//! ## Reglas
//!
//! - Sin error: status = override, o el status actual del sink, o 200.
//! - Con error: status = `error.code` si tiene reason phrase conocida, si no 500.
//! - El mensaje del caller solo se confía para errores 4xx y si no tiene
//!   caracteres de control; para el resto se usa la reason phrase estándar.
//! - Con error, `data` se reemplaza por `{"code": status, "message": mensaje}`.
//!
//! Garantía: el status resultante siempre tiene reason phrase conocida.

use super::{is_field_text, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Descriptor de error crudo, tal como lo entrega el caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl ErrorDescriptor {
    pub fn new(code: i64, message: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
        }
    }
}

/// Status que el sink tiene antes de aplicar la respuesta
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkStatus {
    pub code: u16,
    pub message: Option<String>,
}

/// Resultado de la normalización
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub status: StatusCode,
    pub message: String,
    pub data: Option<Value>,
    /// Error ya normalizado (código y mensaje finales), si había error
    pub error: Option<ErrorDescriptor>,
}

/// Deriva status, mensaje y datos a partir de las entradas del caller
///
/// # Ejemplo
/// ```
/// use http_responder::http::{normalize, ErrorDescriptor, StatusCode};
///
/// let error = ErrorDescriptor::new(999, "whatever");
/// let normalized = normalize(Some(&error), None, None, None);
/// assert_eq!(normalized.status, StatusCode::InternalServerError);
/// assert_eq!(normalized.message, "Internal Server Error");
/// ```
pub fn normalize(
    error: Option<&ErrorDescriptor>,
    code: Option<i64>,
    current: Option<&SinkStatus>,
    data: Option<Value>,
) -> Normalized {
    match error {
        Some(error) => normalize_error(error),
        None => normalize_success(code, current, data),
    }
}

fn normalize_error(error: &ErrorDescriptor) -> Normalized {
    let (status, known) = StatusCode::from_i64_or_internal(error.code);
    if !known {
        tracing::warn!(code = error.code, "unknown error code, responding with 500");
    }

    // el mensaje termina en la línea de status: CR/LF la partirían
    let message = if status.is_client_error() && is_field_text(&error.message) {
        error.message.clone()
    } else {
        status.reason_phrase().to_string()
    };

    let normalized = ErrorDescriptor {
        code: i64::from(status.as_u16()),
        message: message.clone(),
    };
    let data = serde_json::json!({
        "code": status.as_u16(),
        "message": message,
    });

    Normalized {
        status,
        message,
        data: Some(data),
        error: Some(normalized),
    }
}

fn normalize_success(
    code: Option<i64>,
    current: Option<&SinkStatus>,
    data: Option<Value>,
) -> Normalized {
    let (status, message) = match (code, current) {
        (Some(code), _) => {
            let status = known_or_internal(code);
            (status, status.reason_phrase().to_string())
        }
        (None, Some(current)) => {
            let status = known_or_internal(i64::from(current.code));
            // El mensaje del sink solo vale si describe el mismo código
            let message = match &current.message {
                Some(message)
                    if !message.is_empty()
                        && is_field_text(message)
                        && status.as_u16() == current.code =>
                {
                    message.clone()
                }
                _ => status.reason_phrase().to_string(),
            };
            (status, message)
        }
        (None, None) => (StatusCode::Ok, StatusCode::Ok.reason_phrase().to_string()),
    };

    Normalized {
        status,
        message,
        data,
        error: None,
    }
}

fn known_or_internal(code: i64) -> StatusCode {
    let (status, known) = StatusCode::from_i64_or_internal(code);
    if !known {
        tracing::warn!(code, "unknown status code, responding with 500");
    }
    status
}
