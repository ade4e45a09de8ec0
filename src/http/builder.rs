//! # Construcción de respuestas
//!
//! `ResponseBuilder` deriva todo su estado de forma síncrona en `new`:
//!
//! ```text
//! ResponseOptions
//!     → validar modo y headers (falla rápido, sin tocar el sink)
//!     → normalize       (status, mensaje, data)
//!     → serialize_body  (body, bytes)
//!     → HeaderManager   (template del modo, headers del caller, Content-Length)
//!     → status en el sink (200 con body vacío pasa a 204)
//!     → Finalizer       (una sola escritura terminal)
//! ```
//!
//! Sin sink el builder queda "en seco": todos los campos derivados se pueden
//! consultar y `send` no hace nada.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use http_responder::http::{Response, ResponseBuilder, ResponseOptions};
//!
//! let options = ResponseOptions::new()
//!     .with_error(404, "Not Found")
//!     .with_response(Response::default());
//!
//! let mut builder = ResponseBuilder::new(options).unwrap();
//! assert_eq!(builder.body(), r#"{"code":404,"message":"Not Found"}"#);
//!
//! let sink = builder.send().unwrap().unwrap();
//! assert_eq!(sink.status(), 404);
//! ```

use super::{
    is_field_text, normalize, serialize_body, validate_headers, Completion, ErrorDescriptor, Finalizer,
    HeaderManager, Mode, Response, ResponseError, ResponseOptions, ResponseSink, SerializedBody,
    SinkStatus, StatusCode, WriteOnce, CONTENT_LENGTH,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::mpsc;
use std::thread;

/// Estado derivado del builder; cada campo se escribe una sola vez
#[derive(Debug, Default)]
pub struct DerivedState {
    pub status_code: WriteOnce<StatusCode>,
    pub status_message: WriteOnce<String>,
    pub data: WriteOnce<Value>,
    pub error: WriteOnce<ErrorDescriptor>,
    pub body: WriteOnce<String>,
    pub bytes: WriteOnce<usize>,
    pub mode: WriteOnce<Mode>,
}

impl DerivedState {
    /// Asigna el mensaje de status; no puede tener caracteres de control
    pub fn set_status_message(&mut self, message: String) -> Result<bool, ResponseError> {
        self.status_message.set_validated(message, |message| {
            if is_field_text(message) {
                Ok(())
            } else {
                Err(ResponseError::Argument(
                    "status message contains control characters".to_string(),
                ))
            }
        })
    }

    /// Asigna body y bytes juntos; `bytes` debe ser la longitud UTF-8 del body
    pub fn set_body(&mut self, body: String, bytes: usize) -> Result<bool, ResponseError> {
        let accepted = self.bytes.set_validated(bytes, |bytes| {
            if *bytes == body.len() {
                Ok(())
            } else {
                Err(ResponseError::Argument(format!(
                    "bytes {} does not match body length {}",
                    bytes,
                    body.len()
                )))
            }
        })?;
        Ok(self.body.set(body) && accepted)
    }
}

/// Copia serializable del estado derivado
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseSnapshot {
    pub status_code: StatusCode,
    pub status_message: String,
    pub mode: Mode,
    pub data: Option<Value>,
    pub error: Option<ErrorDescriptor>,
    pub body: String,
    pub bytes: usize,
}

/// Formatea una respuesta y la finaliza sobre un sink opcional
pub struct ResponseBuilder<S: ResponseSink = Response> {
    state: DerivedState,
    finalizer: Finalizer<S>,
}

impl<S: ResponseSink> ResponseBuilder<S> {
    /// Deriva el estado completo a partir de las opciones
    ///
    /// Un modo desconocido o un header inválido retornan error antes de
    /// aplicar cualquier header al sink.
    pub fn new(options: ResponseOptions<S>) -> Result<Self, ResponseError> {
        let ResponseOptions {
            data,
            error,
            headers,
            mode,
            code,
            body,
            response,
        } = options;

        let mode = Mode::resolve(mode.as_deref())?;
        let user_headers = validate_headers(&headers)?;

        let mut sink = response;
        let current = sink.as_ref().map(|sink| SinkStatus {
            code: sink.status_code(),
            message: sink.status_message(),
        });

        let normalized = normalize(error.as_ref(), code, current.as_ref(), data);
        let serialized = match body {
            Some(text) => SerializedBody::new(text),
            None => serialize_body(normalized.data.as_ref(), mode)?,
        };

        let mut status = normalized.status;
        let mut message = normalized.message;

        if let Some(sink) = sink.as_mut() {
            HeaderManager::new(Some(&mut *sink)).apply(mode, &user_headers, serialized.bytes);

            if status == StatusCode::Ok && serialized.is_empty() {
                status = StatusCode::NoContent;
                message = status.reason_phrase().to_string();
            }
            // RFC 9110: 1xx, 204 y 304 no llevan Content-Length
            if status.forbids_body() {
                sink.remove_header(CONTENT_LENGTH);
            }

            sink.set_status_code(status.as_u16());
            sink.set_status_message(&message);
        }

        tracing::debug!(
            status = status.as_u16(),
            mode = %mode,
            bytes = serialized.bytes,
            sink = sink.is_some(),
            "response derived"
        );

        let wire_body = if status.forbids_body() {
            String::new()
        } else {
            serialized.text.clone()
        };

        let mut state = DerivedState::default();
        state.status_code.set(status);
        state.set_status_message(message)?;
        if let Some(data) = normalized.data {
            state.data.set(data);
        }
        if let Some(error) = normalized.error {
            state.error.set(error);
        }
        state.set_body(serialized.text, serialized.bytes)?;
        state.mode.set(mode);

        Ok(Self {
            state,
            finalizer: Finalizer::new(sink, wire_body),
        })
    }

    pub fn status_code(&self) -> StatusCode {
        self.state.status_code.get().copied().unwrap_or_default()
    }

    pub fn status_message(&self) -> &str {
        self.state.status_message.get().map(String::as_str).unwrap_or("")
    }

    pub fn data(&self) -> Option<&Value> {
        self.state.data.get()
    }

    pub fn error(&self) -> Option<&ErrorDescriptor> {
        self.state.error.get()
    }

    pub fn body(&self) -> &str {
        self.state.body.get().map(String::as_str).unwrap_or("")
    }

    /// Longitud UTF-8 del body
    pub fn bytes(&self) -> usize {
        self.state.bytes.get().copied().unwrap_or(0)
    }

    pub fn mode(&self) -> Mode {
        self.state.mode.get().copied().unwrap_or_default()
    }

    pub fn state(&self) -> &DerivedState {
        &self.state
    }

    /// Acceso a los campos derivados; las reasignaciones se ignoran
    pub fn state_mut(&mut self) -> &mut DerivedState {
        &mut self.state
    }

    pub fn has_sink(&self) -> bool {
        self.finalizer.sink().is_some()
    }

    /// Sink adjunto, mientras no se haya finalizado
    pub fn sink(&self) -> Option<&S> {
        self.finalizer.sink()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalizer.is_finalized()
    }

    pub fn snapshot(&self) -> ResponseSnapshot {
        ResponseSnapshot {
            status_code: self.status_code(),
            status_message: self.status_message().to_string(),
            mode: self.mode(),
            data: self.data().cloned(),
            error: self.error().cloned(),
            body: self.body().to_string(),
            bytes: self.bytes(),
        }
    }

    /// Escribe el body y cierra el sink
    ///
    /// Devuelve el sink cerrado (`None` si no había sink). Una segunda llamada
    /// con sink retorna `ResponseError::AlreadyFinalized`.
    pub fn send(&mut self) -> Result<Option<S>, ResponseError> {
        self.finalizer.finalize()
    }

    /// Alias de `send`
    pub fn end(&mut self) -> Result<Option<S>, ResponseError> {
        self.send()
    }

    /// Finaliza y entrega el resultado a `callback`
    pub fn send_with<F>(&mut self, callback: F)
    where
        F: FnOnce(Result<Option<S>, ResponseError>),
    {
        callback(self.send());
    }

    /// Finaliza en un thread aparte; el resultado llega por `Completion`
    pub fn send_deferred(mut self) -> Completion<S>
    where
        S: Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // si el receptor ya no existe, nadie espera el resultado
            let _ = tx.send(self.send());
        });
        Completion::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dry(options: ResponseOptions) -> ResponseBuilder {
        ResponseBuilder::new(options).unwrap()
    }

    fn with_sink(options: ResponseOptions) -> ResponseBuilder {
        ResponseBuilder::new(options.with_response(Response::default())).unwrap()
    }

    #[test]
    fn test_dry_builder_derives_state() {
        let builder = dry(ResponseOptions::new().with_data(json!({"id": 7})));
        assert_eq!(builder.status_code(), StatusCode::Ok);
        assert_eq!(builder.status_message(), "OK");
        assert_eq!(builder.body(), r#"{"id":7}"#);
        assert_eq!(builder.bytes(), 8);
        assert_eq!(builder.mode(), Mode::Json);
        assert!(!builder.has_sink());
    }

    #[test]
    fn test_dry_send_is_noop() {
        let mut builder = dry(ResponseOptions::new().with_data("x"));
        assert!(builder.send().unwrap().is_none());
        assert!(builder.end().unwrap().is_none());
        assert!(!builder.is_finalized());
    }

    #[test]
    fn test_dry_builder_keeps_200_with_empty_body() {
        let builder = dry(ResponseOptions::new());
        assert_eq!(builder.status_code(), StatusCode::Ok);
        assert_eq!(builder.body(), "");
    }

    #[test]
    fn test_content_type_per_mode() {
        for mode in Mode::ALL {
            let mut builder = with_sink(ResponseOptions::new().with_data("x").with_mode(mode.as_str()));
            let sink = builder.send().unwrap().unwrap();
            assert_eq!(sink.header("Content-Type").as_deref(), Some(mode.content_type()));
        }
    }

    #[test]
    fn test_not_found_error() {
        let mut builder = with_sink(ResponseOptions::new().with_error(404, "Not Found"));
        assert_eq!(builder.status_code(), StatusCode::NotFound);
        assert_eq!(builder.status_message(), "Not Found");
        assert_eq!(builder.body(), r#"{"code":404,"message":"Not Found"}"#);
        assert_eq!(builder.error(), Some(&ErrorDescriptor::new(404, "Not Found")));

        let sink = builder.send().unwrap().unwrap();
        assert_eq!(sink.status(), 404);
        assert_eq!(sink.body(), br#"{"code":404,"message":"Not Found"}"#);
    }

    #[test]
    fn test_unknown_error_code() {
        let builder = dry(ResponseOptions::new().with_error(999, "whatever"));
        assert_eq!(builder.status_code(), StatusCode::InternalServerError);
        assert_eq!(builder.status_message(), "Internal Server Error");
        assert_eq!(builder.data(), Some(&json!({"code": 500, "message": "Internal Server Error"})));
    }

    #[test]
    fn test_empty_body_becomes_204() {
        let mut builder = with_sink(ResponseOptions::new());
        assert_eq!(builder.status_code(), StatusCode::NoContent);
        assert_eq!(builder.status_message(), "No Content");

        let sink = builder.send().unwrap().unwrap();
        assert_eq!(sink.status(), 204);
        assert!(sink.body().is_empty());
        assert_eq!(sink.header("Content-Length"), None);
    }

    #[test]
    fn test_explicit_204_never_writes_body() {
        let mut builder = with_sink(ResponseOptions::new().with_code(204).with_data("ignored"));
        assert_eq!(builder.body(), r#""ignored""#);

        let sink = builder.send().unwrap().unwrap();
        assert_eq!(sink.status(), 204);
        assert!(sink.body().is_empty());
        assert_eq!(sink.header("Content-Length"), None);
    }

    #[test]
    fn test_empty_text_with_201_is_not_downgraded() {
        let builder = with_sink(ResponseOptions::new().with_code(201).with_mode("text"));
        assert_eq!(builder.status_code(), StatusCode::Created);
    }

    #[test]
    fn test_content_length_is_utf8_bytes() {
        let mut builder = with_sink(ResponseOptions::new().with_data("año ✓").with_mode("text"));
        assert_eq!(builder.bytes(), 8);
        let sink = builder.send().unwrap().unwrap();
        assert_eq!(sink.header("Content-Length").as_deref(), Some("8"));
        assert_eq!(sink.body().len(), 8);
    }

    #[test]
    fn test_caller_cannot_override_content_length() {
        let mut builder = with_sink(
            ResponseOptions::new()
                .with_data("hola")
                .with_mode("text")
                .with_header("content-length", "1000"),
        );
        let sink = builder.send().unwrap().unwrap();
        assert_eq!(sink.header("Content-Length").as_deref(), Some("4"));
    }

    #[test]
    fn test_caller_headers_override_and_remove() {
        let builder = with_sink(
            ResponseOptions::new()
                .with_data("x")
                .with_header("Content-Type", "application/vnd.api+json")
                .with_header("Cache-Control", "no-store")
                .with_header("X-Powered-By", false),
        );
        let sink = builder.sink().unwrap();
        assert_eq!(sink.header("content-type").as_deref(), Some("application/vnd.api+json"));
        assert_eq!(sink.header("Cache-Control").as_deref(), Some("no-store"));
        assert_eq!(sink.header("X-Powered-By"), None);
    }

    #[test]
    fn test_sink_status_is_used_when_no_override() {
        let mut sink = Response::new(202);
        sink.set_status_message("Queued");
        let builder = ResponseBuilder::new(ResponseOptions::new().with_data("ok").with_response(sink)).unwrap();
        assert_eq!(builder.status_code(), StatusCode::Accepted);
        assert_eq!(builder.status_message(), "Queued");
    }

    #[test]
    fn test_unknown_mode_fails_before_headers() {
        let options = ResponseOptions::new().with_mode("xml").with_response(Response::default());
        let err = ResponseBuilder::new(options).err().unwrap();
        assert!(err.is_validation());
        assert!(err.to_string().contains("html, js, json, text"));
    }

    #[test]
    fn test_invalid_header_is_argument_error() {
        let options = ResponseOptions::new().with_header("X-Bad", json!(["a"]));
        assert!(ResponseBuilder::new(options).err().unwrap().is_argument());
    }

    #[test]
    fn test_header_value_with_line_break_is_rejected() {
        let sink = Response::default().with_header("X-Existing", "1");
        let options = ResponseOptions::new()
            .with_data("hola")
            .with_mode("text")
            .with_header("X-A", "v\r\nContent-Length: 9999")
            .with_response(sink);
        let err = ResponseBuilder::new(options).err().unwrap();
        assert!(err.is_argument());
        assert!(err.to_string().contains("X-A"));
    }

    #[test]
    fn test_header_name_must_be_token() {
        let options = ResponseOptions::new().with_header("X-A: 1\r\nX-B", "2");
        assert!(ResponseBuilder::new(options).err().unwrap().is_argument());
    }

    #[test]
    fn test_error_message_cannot_split_status_line() {
        let mut builder = with_sink(ResponseOptions::new().with_error(400, "bad\r\nSet-Cookie: s=1"));
        assert_eq!(builder.status_message(), "Bad Request");
        assert_eq!(builder.error(), Some(&ErrorDescriptor::new(400, "Bad Request")));

        let sink = builder.send().unwrap().unwrap();
        let wire = String::from_utf8(sink.to_bytes()).unwrap();
        assert!(wire.starts_with("HTTP/1.0 400 Bad Request\r\n"), "got: {}", wire);
        assert!(!wire.contains("Set-Cookie"));
    }

    #[test]
    fn test_body_override() {
        let builder = dry(ResponseOptions::new().with_data(json!({"a": 1})).with_body("<p>hi</p>"));
        assert_eq!(builder.body(), "<p>hi</p>");
        assert_eq!(builder.bytes(), 9);
    }

    #[test]
    fn test_write_once_fields() {
        let mut builder = dry(ResponseOptions::new().with_data("first"));
        assert!(!builder.state_mut().data.set(json!("second")));
        assert!(!builder.state_mut().status_code.set(StatusCode::ImATeapot));
        assert_eq!(builder.data(), Some(&json!("first")));
        assert_eq!(builder.status_code(), StatusCode::Ok);
    }

    #[test]
    fn test_unset_field_accepts_first_assignment() {
        let mut builder = dry(ResponseOptions::new());
        assert!(builder.data().is_none());
        assert!(builder.state_mut().data.set(json!(1)));
        assert!(!builder.state_mut().data.set(json!(2)));
        assert_eq!(builder.data(), Some(&json!(1)));
    }

    #[test]
    fn test_state_status_message_is_validated() {
        let mut state = DerivedState::default();
        assert!(state.set_status_message("bad\r\nX-A: 1".to_string()).unwrap_err().is_argument());
        assert!(!state.status_message.is_set());
        assert!(state.set_status_message("Queued".to_string()).unwrap());
        assert!(!state.set_status_message("Later".to_string()).unwrap());
    }

    #[test]
    fn test_state_body_and_bytes_must_agree() {
        let mut state = DerivedState::default();
        assert!(state.set_body("año".to_string(), 3).unwrap_err().is_argument());
        assert!(!state.bytes.is_set());
        assert!(state.set_body("año".to_string(), 4).unwrap());
        assert_eq!(state.bytes.get(), Some(&4));
    }

    #[test]
    fn test_built_state_ignores_reassignment() {
        let mut builder = dry(ResponseOptions::new().with_data("x").with_mode("text"));
        assert!(!builder.state_mut().set_body("yy".to_string(), 2).unwrap());
        assert_eq!(builder.body(), "x");
        assert_eq!(builder.bytes(), 1);
    }

    #[test]
    fn test_double_send_is_fault() {
        let mut builder = with_sink(ResponseOptions::new().with_data("x"));
        builder.send().unwrap();
        assert!(builder.is_finalized());
        assert!(matches!(builder.send(), Err(ResponseError::AlreadyFinalized)));
    }

    #[test]
    fn test_send_with_callback() {
        let mut builder = with_sink(ResponseOptions::new().with_data("x"));
        let mut status = None;
        builder.send_with(|result| {
            status = result.unwrap().map(|sink| sink.status());
        });
        assert_eq!(status, Some(200));
    }

    #[test]
    fn test_send_deferred() {
        let builder = with_sink(ResponseOptions::new().with_error(409, "job not ready"));
        let sink = builder.send_deferred().wait().unwrap().unwrap();
        assert_eq!(sink.status(), 409);
        assert!(sink.is_ended());
    }

    #[test]
    fn test_snapshot_serializes() {
        let builder = dry(ResponseOptions::new().with_error(404, "Not Found"));
        let snapshot = serde_json::to_value(builder.snapshot()).unwrap();
        assert_eq!(snapshot["status_code"], json!(404));
        assert_eq!(snapshot["mode"], json!("json"));
        assert_eq!(snapshot["bytes"], json!(34));
    }
}
