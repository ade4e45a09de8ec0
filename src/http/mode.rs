//! # Registro de Modos
//!
//! Un modo selecciona a la vez el `Content-Type` y la estrategia de
//! serialización del body. El conjunto es cerrado:
//!
//! | modo | content-type                            |
//! |------|-----------------------------------------|
//! | html | text/html; charset=utf-8                |
//! | js   | application/javascript; charset=utf-8   |
//! | json | application/json; charset=utf-8         |
//! | text | text/plain; charset=utf-8               |
//!
//! La tabla es `static` y nunca se modifica después de arrancar el proceso.

use super::ResponseError;
use std::str::FromStr;

/// Modo de salida de una respuesta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    Html,
    Js,
    #[default]
    Json,
    Text,
}

/// Headers que aplica cada modo
pub type ModeTemplate = &'static [(&'static str, &'static str)];

static MODE_TEMPLATES: [(Mode, ModeTemplate); 4] = [
    (Mode::Html, &[("Content-Type", "text/html; charset=utf-8")]),
    (Mode::Js, &[("Content-Type", "application/javascript; charset=utf-8")]),
    (Mode::Json, &[("Content-Type", "application/json; charset=utf-8")]),
    (Mode::Text, &[("Content-Type", "text/plain; charset=utf-8")]),
];

impl Mode {
    /// Todos los modos, en el orden en que se listan en los mensajes de error
    pub const ALL: [Mode; 4] = [Mode::Html, Mode::Js, Mode::Json, Mode::Text];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Html => "html",
            Mode::Js => "js",
            Mode::Json => "json",
            Mode::Text => "text",
        }
    }

    /// Headers del template de este modo
    pub fn template(&self) -> ModeTemplate {
        MODE_TEMPLATES
            .iter()
            .find(|(mode, _)| mode == self)
            .map(|(_, template)| *template)
            .unwrap_or(&[])
    }

    /// Valor de `Content-Type` del template
    ///
    /// # Ejemplo
    /// ```
    /// use http_responder::http::Mode;
    /// assert_eq!(Mode::Json.content_type(), "application/json; charset=utf-8");
    /// ```
    pub fn content_type(&self) -> &'static str {
        self.template()
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("Content-Type"))
            .map(|(_, value)| *value)
            .unwrap_or("application/octet-stream")
    }

    /// Lista separada por comas: "html, js, json, text"
    pub fn allowed() -> String {
        Mode::ALL
            .iter()
            .map(Mode::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Resuelve un modo opcional; `None` significa el default (`json`)
    pub fn resolve(name: Option<&str>) -> Result<Mode, ResponseError> {
        match name {
            Some(name) => name.parse(),
            None => Ok(Mode::default()),
        }
    }
}

impl FromStr for Mode {
    type Err = ResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ResponseError::Validation {
                mode: s.to_string(),
                allowed: Mode::allowed(),
            })
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for Mode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types_match_table() {
        assert_eq!(Mode::Html.content_type(), "text/html; charset=utf-8");
        assert_eq!(Mode::Js.content_type(), "application/javascript; charset=utf-8");
        assert_eq!(Mode::Json.content_type(), "application/json; charset=utf-8");
        assert_eq!(Mode::Text.content_type(), "text/plain; charset=utf-8");
    }

    #[test]
    fn test_every_mode_has_template() {
        for mode in Mode::ALL {
            assert_eq!(mode.template().len(), 1, "template for {}", mode);
        }
    }

    #[test]
    fn test_parse_known_modes() {
        assert_eq!("html".parse::<Mode>().unwrap(), Mode::Html);
        assert_eq!("js".parse::<Mode>().unwrap(), Mode::Js);
        assert_eq!("json".parse::<Mode>().unwrap(), Mode::Json);
        assert_eq!("text".parse::<Mode>().unwrap(), Mode::Text);
    }

    #[test]
    fn test_parse_unknown_mode() {
        let err = "xml".parse::<Mode>().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("html, js, json, text"));
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("JSON".parse::<Mode>().is_err());
    }

    #[test]
    fn test_resolve_default_is_json() {
        assert_eq!(Mode::resolve(None).unwrap(), Mode::Json);
        assert_eq!(Mode::resolve(Some("text")).unwrap(), Mode::Text);
    }
}
