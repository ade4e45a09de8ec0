//! # Opciones de una respuesta
//!
//! `ResponseOptions` es la entrada del builder. Se puede armar con los
//! métodos `with_*` o deserializar desde JSON:
//!
//! ```json
//! {
//!   "data": {"id": 7},
//!   "error": {"code": 404, "message": "Not Found"},
//!   "headers": {"Cache-Control": "no-store", "X-Powered-By": false},
//!   "mode": "json",
//!   "code": 201
//! }
//! ```
//!
//! El sink (`response`) no viaja en JSON; se adjunta con `with_response`.

use super::{ErrorDescriptor, Response, ResponseError, ResponseSink};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Opciones de construcción de una respuesta
#[derive(Debug, Clone)]
pub struct ResponseOptions<S = Response> {
    /// Payload; `None` equivale a "sin datos"
    pub data: Option<Value>,
    pub error: Option<ErrorDescriptor>,
    /// Headers del caller. `null`/`false` quitan el header
    pub headers: BTreeMap<String, Value>,
    /// Nombre del modo; `None` significa `json`
    pub mode: Option<String>,
    /// Override del status cuando no hay error
    pub code: Option<i64>,
    /// Body explícito; reemplaza a la serialización de `data`
    pub body: Option<String>,
    pub response: Option<S>,
}

/// Forma JSON de las opciones (todo salvo el sink)
#[derive(Debug, Default, Deserialize)]
struct RawOptions {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<ErrorDescriptor>,
    #[serde(default)]
    headers: BTreeMap<String, Value>,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    body: Option<String>,
}

impl ResponseOptions {
    /// Opciones vacías, sin sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsea opciones desde texto JSON
    ///
    /// Un `error` que no es objeto o un `body` que no es string producen
    /// `ResponseError::Argument`.
    pub fn from_json(text: &str) -> Result<Self, ResponseError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| ResponseError::Argument(format!("options are not valid JSON: {}", e)))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ResponseError> {
        if !value.is_object() {
            return Err(ResponseError::Argument("options must be a JSON object".to_string()));
        }
        let raw: RawOptions = serde_json::from_value(value)
            .map_err(|e| ResponseError::Argument(e.to_string()))?;
        Ok(Self {
            data: raw.data,
            error: raw.error,
            headers: raw.headers,
            mode: raw.mode,
            code: raw.code,
            body: raw.body,
            response: None,
        })
    }
}

impl<S> Default for ResponseOptions<S> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            headers: BTreeMap::new(),
            mode: None,
            code: None,
            body: None,
            response: None,
        }
    }
}

impl<S> ResponseOptions<S> {
    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn with_error(mut self, code: i64, message: &str) -> Self {
        self.error = Some(ErrorDescriptor::new(code, message));
        self
    }

    /// Agrega un header; `Value::Null` o `false` lo quitan del sink
    pub fn with_header(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.headers.insert(name.to_string(), value.into());
        self
    }

    pub fn with_mode(mut self, mode: &str) -> Self {
        self.mode = Some(mode.to_string());
        self
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }

    /// Adjunta un sink; cambia el tipo de sink de las opciones
    pub fn with_response<T: ResponseSink>(self, response: T) -> ResponseOptions<T> {
        ResponseOptions {
            data: self.data,
            error: self.error,
            headers: self.headers,
            mode: self.mode,
            code: self.code,
            body: self.body,
            response: Some(response),
        }
    }

    /// Opciones de `other` que no están definidas aquí se completan desde allí
    pub fn merge_defaults<T>(mut self, other: ResponseOptions<T>) -> Self {
        self.data = self.data.or(other.data);
        self.error = self.error.or(other.error);
        self.mode = self.mode.or(other.mode);
        self.code = self.code.or(other.code);
        self.body = self.body.or(other.body);
        for (name, value) in other.headers {
            self.headers.entry(name).or_insert(value);
        }
        self
    }
}
