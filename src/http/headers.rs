//! # Manejo de headers
//!
//! `HeaderManager` aplica y lee headers sobre un sink opcional. Sin sink,
//! todas las operaciones son no-op.
//!
//! Orden de aplicación al construir una respuesta:
//! 1. Headers del template del modo
//! 2. Headers del caller (pueden sobrescribir al template)
//! 3. `Content-Length`, siempre al final y sin posibilidad de override

use super::{Mode, ResponseError, ResponseSink};
use serde_json::Value;

pub const CONTENT_LENGTH: &str = "Content-Length";

/// `true` si `name` es un token HTTP válido (RFC 9110 §5.6.2)
pub fn is_token(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(
                    b,
                    b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^'
                        | b'_' | b'`' | b'|' | b'~'
                )
        })
}

/// `true` si `text` puede ir en un header o en la línea de status
///
/// Solo se permite HTAB entre los caracteres de control; CR, LF y NUL
/// partirían el mensaje.
pub fn is_field_text(text: &str) -> bool {
    !text.chars().any(|c| c.is_control() && c != '\t')
}

/// Convierte un valor de header del caller a su forma final
///
/// - `null` y `false` significan "quitar el header" (`Ok(None)`)
/// - strings, números y `true` se convierten a texto
/// - arrays, objetos y strings con caracteres de control no son válidos
pub fn header_text(name: &str, value: &Value) -> Result<Option<String>, ResponseError> {
    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Bool(true) => Ok(Some("true".to_string())),
        Value::String(s) if !is_field_text(s) => Err(ResponseError::Argument(format!(
            "header \"{}\" contains control characters",
            name
        ))),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(_) | Value::Object(_) => Err(ResponseError::Argument(format!(
            "header \"{}\" must be a string, number or boolean",
            name
        ))),
    }
}

/// Valida todos los headers del caller antes de aplicar cualquiera
pub fn validate_headers<'a, I>(headers: I) -> Result<Vec<(String, Option<String>)>, ResponseError>
where
    I: IntoIterator<Item = (&'a String, &'a Value)>,
{
    headers
        .into_iter()
        .map(|(name, value)| {
            if name.trim().is_empty() {
                return Err(ResponseError::Argument("header name must not be empty".to_string()));
            }
            if !is_token(name) {
                return Err(ResponseError::Argument(format!(
                    "header name {:?} is not a valid token",
                    name
                )));
            }
            Ok((name.clone(), header_text(name, value)?))
        })
        .collect()
}

/// Lee y escribe headers sobre un sink opcional
pub struct HeaderManager<'a, S: ResponseSink> {
    sink: Option<&'a mut S>,
}

impl<'a, S: ResponseSink> HeaderManager<'a, S> {
    pub fn new(sink: Option<&'a mut S>) -> Self {
        Self { sink }
    }

    /// Valor actual del header en el sink; `None` sin sink
    pub fn get(&self, name: &str) -> Option<String> {
        self.sink.as_ref().and_then(|sink| sink.header(name))
    }

    /// Asigna el header, o lo quita si `value` es `None`
    pub fn set(&mut self, name: &str, value: Option<&str>) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        match value {
            Some(value) => sink.set_header(name, value),
            None => sink.remove_header(name),
        }
    }

    /// Aplica template del modo, headers del caller y `Content-Length`
    pub fn apply(&mut self, mode: Mode, user_headers: &[(String, Option<String>)], bytes: usize) {
        if self.sink.is_none() {
            return;
        }
        for (name, value) in mode.template() {
            self.set(name, Some(*value));
        }
        for (name, value) in user_headers {
            self.set(name, value.as_deref());
        }
        let length = bytes.to_string();
        self.set(CONTENT_LENGTH, Some(length.as_str()));
        tracing::debug!(mode = %mode, headers = user_headers.len(), bytes, "headers applied");
    }
}
