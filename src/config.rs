//! # Configuración del CLI
//! src/config.rs
//!
//! Este módulo define la configuración del binario `http_responder` con
//! soporte para argumentos CLI y variables de entorno. El binario arma una
//! respuesta con las opciones dadas y escribe el mensaje HTTP en stdout.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./http_responder --mode text --data hola -H "Cache-Control: no-store"
//! ./http_responder --error-code 404 --error-message "Not Found"
//! ./http_responder --input response.json --dry-run
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! RESPONDER_MODE=html RESPONDER_LOG_LEVEL=debug ./http_responder --data "<h1>hi</h1>"
//! ```

use crate::http::{ErrorDescriptor, ResponseError, ResponseOptions};
use clap::Parser;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Errores al convertir la configuración en opciones
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Cannot read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Options(#[from] ResponseError),
}

/// Configuración del formateador
#[derive(Debug, Clone, Parser)]
#[command(name = "http_responder")]
#[command(about = "Formatea una respuesta HTTP y la escribe en stdout")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Modo de salida: html, js, json o text (default json)
    #[arg(short, long, env = "RESPONDER_MODE")]
    pub mode: Option<String>,

    /// Override del status code cuando no hay error
    #[arg(short, long, env = "RESPONDER_CODE")]
    pub code: Option<i64>,

    /// Header adicional "Nombre: valor" (repetible). "Nombre:" vacío lo quita
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Payload. Se interpreta como JSON; si no parsea, como string
    #[arg(short, long)]
    pub data: Option<String>,

    /// Tratar `--data` siempre como string literal
    #[arg(long)]
    pub raw: bool,

    // === Error ===

    /// Código del error a reportar
    #[arg(long = "error-code", allow_negative_numbers = true)]
    pub error_code: Option<i64>,

    /// Mensaje del error (solo se publica para 4xx)
    #[arg(long = "error-message")]
    pub error_message: Option<String>,

    /// Body explícito, sin serializar
    #[arg(long)]
    pub body: Option<String>,

    /// Archivo JSON con opciones; los flags tienen prioridad
    #[arg(short, long, env = "RESPONDER_INPUT")]
    pub input: Option<PathBuf>,

    /// No escribe el mensaje HTTP; imprime el estado derivado como JSON
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Nivel de log (trace, debug, info, warn, error)
    #[arg(long = "log-level", default_value = "info", env = "RESPONDER_LOG_LEVEL")]
    pub log_level: String,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        for header in &self.headers {
            parse_header(header)?;
        }

        if self.error_message.is_some() && self.error_code.is_none() {
            return Err("--error-message requires --error-code".to_string());
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Log level must be one of {}",
                LOG_LEVELS.join(", ")
            ));
        }

        Ok(())
    }

    /// Payload de `--data` ya interpretado
    pub fn data_value(&self) -> Option<Value> {
        let data = self.data.as_ref()?;
        if self.raw {
            return Some(Value::String(data.clone()));
        }
        Some(serde_json::from_str(data).unwrap_or_else(|_| Value::String(data.clone())))
    }

    /// Convierte la configuración en opciones del builder
    ///
    /// Si hay `--input`, sus valores completan lo que los flags no definen.
    pub fn to_options(&self) -> Result<ResponseOptions, ConfigError> {
        self.validate().map_err(ConfigError::Invalid)?;

        let mut options = ResponseOptions::new();
        options.data = self.data_value();
        options.mode = self.mode.clone();
        options.code = self.code;
        options.body = self.body.clone();
        options.error = self.error_code.map(|code| ErrorDescriptor {
            code,
            message: self.error_message.clone().unwrap_or_default(),
        });
        for header in &self.headers {
            let (name, value) = parse_header(header)?;
            let value = match value {
                Some(value) => Value::String(value),
                None => Value::Null,
            };
            options.headers.insert(name, value);
        }

        if let Some(path) = &self.input {
            let text = fs::read_to_string(path)?;
            options = options.merge_defaults(ResponseOptions::from_json(&text)?);
        }

        Ok(options)
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        tracing::info!(
            mode = self.mode.as_deref().unwrap_or("json"),
            code = ?self.code,
            headers = self.headers.len(),
            error_code = ?self.error_code,
            input = ?self.input,
            dry_run = self.dry_run,
            "configuration loaded"
        );
    }
}

/// Parsea `"Nombre: valor"`; un valor vacío significa "quitar el header"
pub fn parse_header(raw: &str) -> Result<(String, Option<String>), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("Invalid header \"{}\": expected \"Name: value\"", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("Invalid header \"{}\": empty name", raw));
    }
    let value = value.trim();
    let value = if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    };
    Ok((name.to_string(), value))
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            mode: None,
            code: None,
            headers: Vec::new(),
            data: None,
            raw: false,
            error_code: None,
            error_message: None,
            body: None,
            input: None,
            dry_run: false,
            log_level: "info".to_string(),
        }
    }
}

impl From<String> for ConfigError {
    fn from(message: String) -> Self {
        ConfigError::Invalid(message)
    }
}
