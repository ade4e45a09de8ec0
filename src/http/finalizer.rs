//! # Finalización
//!
//! `Finalizer` guarda el sink y el body ya serializado, y ejecuta la
//! escritura terminal una sola vez.
//!
//! ```text
//! Constructed → (HeadersApplied si hay sink) → Finalized
//! ```
//!
//! - Sin sink: `finalize` es no-op y siempre retorna `Ok(None)`.
//! - Con sink: la primera llamada escribe el body, cierra el sink y lo
//!   devuelve al caller. La segunda retorna `ResponseError::AlreadyFinalized`.

use super::{ResponseError, ResponseSink};
use std::io;
use std::sync::mpsc;

pub struct Finalizer<S> {
    sink: Option<S>,
    body: String,
    finalized: bool,
}

impl<S: ResponseSink> Finalizer<S> {
    pub fn new(sink: Option<S>, body: String) -> Self {
        Self {
            sink,
            body,
            finalized: false,
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }

    /// Escribe el body y cierra el sink; devuelve el sink cerrado
    pub fn finalize(&mut self) -> Result<Option<S>, ResponseError> {
        if self.finalized {
            tracing::warn!("finalize called on an already finalized response");
            return Err(ResponseError::AlreadyFinalized);
        }
        let Some(mut sink) = self.sink.take() else {
            tracing::debug!("no sink attached, finalize is a no-op");
            return Ok(None);
        };

        self.finalized = true;
        sink.end(&self.body)?;
        tracing::debug!(bytes = self.body.len(), "response finalized");
        Ok(Some(sink))
    }
}

/// Resultado diferido de una finalización en otro thread
///
/// Se resuelve exactamente una vez.
pub struct Completion<S> {
    receiver: mpsc::Receiver<Result<Option<S>, ResponseError>>,
}

impl<S> Completion<S> {
    pub(crate) fn new(receiver: mpsc::Receiver<Result<Option<S>, ResponseError>>) -> Self {
        Self { receiver }
    }

    /// Bloquea hasta que la finalización termina
    pub fn wait(self) -> Result<Option<S>, ResponseError> {
        self.receiver.recv().map_err(|_| {
            ResponseError::Sink(io::Error::new(
                io::ErrorKind::Other,
                "finalizer thread exited without a result",
            ))
        })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Response;

    #[test]
    fn test_finalize_without_sink_is_noop() {
        let mut finalizer: Finalizer<Response> = Finalizer::new(None, "body".to_string());
        assert!(finalizer.finalize().unwrap().is_none());
        assert!(finalizer.finalize().unwrap().is_none());
        assert!(!finalizer.is_finalized());
    }

    #[test]
    fn test_finalize_writes_body_once() {
        let mut finalizer = Finalizer::new(Some(Response::default()), "hola".to_string());
        let sink = finalizer.finalize().unwrap().unwrap();
        assert_eq!(sink.body(), b"hola");
        assert!(sink.is_ended());
        assert!(finalizer.is_finalized());
        assert!(finalizer.sink().is_none());
    }

    #[test]
    fn test_second_finalize_is_fault() {
        let mut finalizer = Finalizer::new(Some(Response::default()), String::new());
        finalizer.finalize().unwrap();
        assert!(matches!(finalizer.finalize(), Err(ResponseError::AlreadyFinalized)));
    }

    #[test]
    fn test_sink_failure_propagates() {
        let mut ended = Response::default();
        ended.end("").unwrap();
        let mut finalizer = Finalizer::new(Some(ended), "x".to_string());
        assert!(matches!(finalizer.finalize(), Err(ResponseError::Sink(_))));
    }
}
