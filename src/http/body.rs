//! # Serialización del body
//!
//! - Modo `json`: JSON determinista (las claves de objetos salen ordenadas).
//! - Otros modos: coerción a string. Datos ausentes producen `""`.
//!
//! `bytes` es siempre la longitud UTF-8 exacta del body, nunca la cantidad de
//! caracteres.

use super::{Mode, ResponseError};
use serde_json::Value;

/// Body serializado junto con su longitud en bytes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SerializedBody {
    pub text: String,
    pub bytes: usize,
}

impl SerializedBody {
    pub fn new(text: String) -> Self {
        let bytes = text.len();
        Self { text, bytes }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes == 0
    }
}

/// Renderiza `data` según el modo
///
/// # Ejemplo
/// ```
/// use http_responder::http::{serialize_body, Mode};
/// use serde_json::json;
///
/// let body = serialize_body(Some(&json!({"b": 1, "a": "ñ"})), Mode::Json).unwrap();
/// assert_eq!(body.text, r#"{"a":"ñ","b":1}"#);
/// assert_eq!(body.bytes, 16);
/// ```
pub fn serialize_body(data: Option<&Value>, mode: Mode) -> Result<SerializedBody, ResponseError> {
    let text = match (data, mode) {
        (None, _) => String::new(),
        (Some(value), Mode::Json) => serde_json::to_string(value)?,
        (Some(value), _) => coerce_to_text(value),
    };
    Ok(SerializedBody::new(text))
}

/// Coerción de un valor JSON a texto plano
///
/// Los strings se usan tal cual (sin comillas), `null` es vacío, los arrays
/// se unen con comas y los objetos se renderizan como JSON.
pub fn coerce_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(coerce_to_text)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}
