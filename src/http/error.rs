//! # Errores del formateador
//!
//! Un único tipo de error para todo el crate. Las fallas de validación se
//! detectan durante la construcción del builder, antes de tocar el sink.
//!
//! Un código de error desconocido NO es un error: se normaliza a 500 (ver
//! `normalize`).

use thiserror::Error;

/// Errores que pueden ocurrir al construir o finalizar una respuesta
#[derive(Debug, Error)]
pub enum ResponseError {
    /// Entrada malformada: `error` que no es objeto, body que no es string,
    /// valor de header que no se puede convertir a texto
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// Modo desconocido; el mensaje enumera los modos válidos
    #[error("Invalid mode \"{mode}\": expected one of {allowed}")]
    Validation { mode: String, allowed: String },

    /// Se llamó a `send`/`end` por segunda vez sobre un sink ya cerrado
    #[error("Response already finalized")]
    AlreadyFinalized,

    /// Falla de I/O en la escritura terminal del sink
    #[error("Sink error: {0}")]
    Sink(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ResponseError {
    pub fn is_argument(&self) -> bool {
        matches!(self, ResponseError::Argument(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ResponseError::Validation { .. })
    }
}
