//! # Respuesta HTTP en memoria
//!
//! `Response` es el sink más simple: acumula status, headers y body en memoria
//! y puede convertirse a bytes con el formato HTTP/1.0.
//!
//! ## Formato de una respuesta HTTP/1.0
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Content-Type: application/json; charset=utf-8\r\n
//! Content-Length: 11\r\n
//! \r\n
//! {"ok":true}
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use http_responder::http::{Response, ResponseSink};
//!
//! let mut response = Response::new(200)
//!     .with_header("Content-Type", "application/json; charset=utf-8");
//! response.end(r#"{"ok":true}"#).unwrap();
//!
//! let bytes = response.to_bytes();
//! // Ahora puedes enviar `bytes` por el socket
//! ```

use super::{is_field_text, ResponseSink, StatusCode};
use std::io;

/// Representa una respuesta HTTP/1.0 completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: u16,

    /// Reason phrase explícita; si falta se usa la estándar
    status_message: Option<String>,

    /// Headers en orden de inserción. Los nombres no distinguen mayúsculas,
    /// así que un Vec evita duplicados sin perder el orden
    headers: Vec<(String, String)>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,

    /// `true` después de la escritura terminal
    ended: bool,
}

impl Response {
    /// Crea una nueva respuesta con el código de estado especificado
    ///
    /// Por defecto, la respuesta no tiene headers ni body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            status_message: None,
            headers: Vec::new(),
            body: Vec::new(),
            ended: false,
        }
    }

    /// Agrega un header a la respuesta (versión builder)
    ///
    /// Si el header ya existe, se sobrescribe.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.set_header(name, value);
        self
    }

    /// Reason phrase que irá en la status line
    fn reason(&self) -> &str {
        match &self.status_message {
            Some(message) => message,
            None => StatusCode::from_u16(self.status)
                .map(|s| s.reason_phrase())
                .unwrap_or(""),
        }
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// Genera el formato completo HTTP/1.0:
    /// - Status line: `HTTP/1.0 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();

        // 1. Status line
        let status_line = format!("HTTP/1.0 {} {}\r\n", self.status, self.reason());
        result.extend_from_slice(status_line.as_bytes());

        // 2. Headers
        for (name, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        // 3. Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");

        // 4. Body (si existe)
        result.extend_from_slice(&self.body);

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Obtiene una referencia a los headers
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new(StatusCode::Ok.as_u16())
    }
}

impl ResponseSink for Response {
    fn header(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }

    fn set_header(&mut self, name: &str, value: &str) {
        match self.headers.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    fn remove_header(&mut self, name: &str) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    fn status_code(&self) -> u16 {
        self.status
    }

    fn set_status_code(&mut self, code: u16) {
        self.status = code;
    }

    fn status_message(&self) -> Option<String> {
        self.status_message.clone()
    }

    /// Un mensaje con caracteres de control se descarta y vuelve la reason phrase
    fn set_status_message(&mut self, message: &str) {
        self.status_message = is_field_text(message).then(|| message.to_string());
    }

    fn end(&mut self, body: &str) -> io::Result<()> {
        if self.ended {
            return Err(io::Error::new(io::ErrorKind::Other, "write after end"));
        }
        self.body = body.as_bytes().to_vec();
        self.ended = true;
        Ok(())
    }
}
