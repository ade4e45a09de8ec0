//! # Códigos de Estado HTTP
//!
//! Este módulo define la tabla cerrada de códigos de estado HTTP que el
//! formateador reconoce. Un código solo es "conocido" si tiene una reason
//! phrase estándar en esta tabla; cualquier otro se normaliza a 500 antes de
//! llegar al cable.
//!
//! - **1xx**: Informacional
//! - **2xx**: Éxito (200 OK, 204 No Content, ...)
//! - **3xx**: Redirección
//! - **4xx**: Error del cliente (400, 404, 409, 429, ...)
//! - **5xx**: Error del servidor (500, 503, ...)

/// Genera el enum `StatusCode` junto con sus tablas de conversión.
macro_rules! status_codes {
    ($( $(#[$doc:meta])* $variant:ident = $code:literal => $phrase:literal, )+) => {
        /// Representa los códigos de estado HTTP que tienen reason phrase estándar
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum StatusCode {
            $( $(#[$doc])* $variant = $code, )+
        }

        impl StatusCode {
            /// Busca el código en la tabla; `None` si no tiene reason phrase conocida
            ///
            /// # Ejemplo
            /// ```
            /// use http_responder::http::StatusCode;
            /// assert_eq!(StatusCode::from_u16(404), Some(StatusCode::NotFound));
            /// assert_eq!(StatusCode::from_u16(999), None);
            /// ```
            pub fn from_u16(code: u16) -> Option<Self> {
                match code {
                    $( $code => Some(StatusCode::$variant), )+
                    _ => None,
                }
            }

            /// Retorna el texto de razón (reason phrase) asociado al código
            ///
            /// # Ejemplo
            /// ```
            /// use http_responder::http::StatusCode;
            /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
            /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
            /// ```
            pub fn reason_phrase(&self) -> &'static str {
                match self {
                    $( StatusCode::$variant => $phrase, )+
                }
            }
        }
    };
}

status_codes! {
    Continue = 100 => "Continue",
    SwitchingProtocols = 101 => "Switching Protocols",
    Processing = 102 => "Processing",
    EarlyHints = 103 => "Early Hints",
    /// 200 OK - La petición fue exitosa
    Ok = 200 => "OK",
    Created = 201 => "Created",
    Accepted = 202 => "Accepted",
    NonAuthoritativeInformation = 203 => "Non-Authoritative Information",
    /// 204 No Content - Petición exitosa sin contenido en el body
    NoContent = 204 => "No Content",
    ResetContent = 205 => "Reset Content",
    PartialContent = 206 => "Partial Content",
    MultiStatus = 207 => "Multi-Status",
    AlreadyReported = 208 => "Already Reported",
    ImUsed = 226 => "IM Used",
    MultipleChoices = 300 => "Multiple Choices",
    MovedPermanently = 301 => "Moved Permanently",
    Found = 302 => "Found",
    SeeOther = 303 => "See Other",
    /// 304 Not Modified - Tampoco lleva body
    NotModified = 304 => "Not Modified",
    UseProxy = 305 => "Use Proxy",
    TemporaryRedirect = 307 => "Temporary Redirect",
    PermanentRedirect = 308 => "Permanent Redirect",
    /// 400 Bad Request - Parámetros inválidos o malformados
    BadRequest = 400 => "Bad Request",
    Unauthorized = 401 => "Unauthorized",
    PaymentRequired = 402 => "Payment Required",
    Forbidden = 403 => "Forbidden",
    /// 404 Not Found - Ruta o recurso no encontrado
    NotFound = 404 => "Not Found",
    MethodNotAllowed = 405 => "Method Not Allowed",
    NotAcceptable = 406 => "Not Acceptable",
    ProxyAuthenticationRequired = 407 => "Proxy Authentication Required",
    RequestTimeout = 408 => "Request Timeout",
    /// 409 Conflict - Conflicto en el estado del recurso
    Conflict = 409 => "Conflict",
    Gone = 410 => "Gone",
    LengthRequired = 411 => "Length Required",
    PreconditionFailed = 412 => "Precondition Failed",
    PayloadTooLarge = 413 => "Payload Too Large",
    UriTooLong = 414 => "URI Too Long",
    UnsupportedMediaType = 415 => "Unsupported Media Type",
    RangeNotSatisfiable = 416 => "Range Not Satisfiable",
    ExpectationFailed = 417 => "Expectation Failed",
    ImATeapot = 418 => "I'm a Teapot",
    MisdirectedRequest = 421 => "Misdirected Request",
    UnprocessableEntity = 422 => "Unprocessable Entity",
    Locked = 423 => "Locked",
    FailedDependency = 424 => "Failed Dependency",
    TooEarly = 425 => "Too Early",
    UpgradeRequired = 426 => "Upgrade Required",
    PreconditionRequired = 428 => "Precondition Required",
    /// 429 Too Many Requests - Rate limiting activado
    TooManyRequests = 429 => "Too Many Requests",
    RequestHeaderFieldsTooLarge = 431 => "Request Header Fields Too Large",
    UnavailableForLegalReasons = 451 => "Unavailable For Legal Reasons",
    /// 500 Internal Server Error - Error interno del servidor
    InternalServerError = 500 => "Internal Server Error",
    NotImplemented = 501 => "Not Implemented",
    BadGateway = 502 => "Bad Gateway",
    /// 503 Service Unavailable - Servidor sobrecargado
    ServiceUnavailable = 503 => "Service Unavailable",
    GatewayTimeout = 504 => "Gateway Timeout",
    HttpVersionNotSupported = 505 => "HTTP Version Not Supported",
    VariantAlsoNegotiates = 506 => "Variant Also Negotiates",
    InsufficientStorage = 507 => "Insufficient Storage",
    LoopDetected = 508 => "Loop Detected",
    BandwidthLimitExceeded = 509 => "Bandwidth Limit Exceeded",
    NotExtended = 510 => "Not Extended",
    NetworkAuthenticationRequired = 511 => "Network Authentication Required",
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use http_responder::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Versión tolerante de `from_u16`: acepta cualquier entero y degrada a
    /// 500 si no es un código conocido (negativos, > 65535, o fuera de tabla)
    pub fn from_i64_or_internal(code: i64) -> (Self, bool) {
        match u16::try_from(code).ok().and_then(Self::from_u16) {
            Some(status) => (status, true),
            None => (StatusCode::InternalServerError, false),
        }
    }

    /// Verifica si el código indica error del cliente (4xx)
    ///
    /// # Ejemplo
    /// ```
    /// use http_responder::http::StatusCode;
    /// assert!(StatusCode::BadRequest.is_client_error());
    /// assert!(!StatusCode::Ok.is_client_error());
    /// ```
    pub fn is_client_error(&self) -> bool {
        (400..=499).contains(&self.as_u16())
    }

    /// Respuestas que nunca llevan body (RFC 9110: 1xx, 204, 304)
    pub fn forbids_body(&self) -> bool {
        let code = self.as_u16();
        code < 200 || code == 204 || code == 304
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        StatusCode::Ok
    }
}

impl std::fmt::Display for StatusCode {
    /// Formatea el código de estado para mostrarlo
    ///
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

impl serde::Serialize for StatusCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_values() {
        assert_eq!(StatusCode::Ok.as_u16(), 200);
        assert_eq!(StatusCode::BadRequest.as_u16(), 400);
        assert_eq!(StatusCode::NotFound.as_u16(), 404);
        assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
    }

    #[test]
    fn test_reason_phrases() {
        assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
        assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
        assert_eq!(StatusCode::ImATeapot.reason_phrase(), "I'm a Teapot");
        assert_eq!(StatusCode::ServiceUnavailable.reason_phrase(), "Service Unavailable");
    }

    #[test]
    fn test_from_u16_roundtrips_known_codes() {
        for code in [100, 200, 204, 301, 404, 418, 451, 500, 511] {
            let status = StatusCode::from_u16(code).expect("known code");
            assert_eq!(status.as_u16(), code);
        }
    }

    #[test]
    fn test_from_u16_unknown() {
        assert_eq!(StatusCode::from_u16(0), None);
        assert_eq!(StatusCode::from_u16(299), None);
        assert_eq!(StatusCode::from_u16(999), None);
    }

    #[test]
    fn test_from_i64_or_internal() {
        assert_eq!(StatusCode::from_i64_or_internal(404), (StatusCode::NotFound, true));
        assert_eq!(StatusCode::from_i64_or_internal(-1), (StatusCode::InternalServerError, false));
        assert_eq!(StatusCode::from_i64_or_internal(70_000), (StatusCode::InternalServerError, false));
        assert_eq!(StatusCode::from_i64_or_internal(999), (StatusCode::InternalServerError, false));
    }

    #[test]
    fn test_is_client_error() {
        assert!(!StatusCode::Ok.is_client_error());
        assert!(StatusCode::BadRequest.is_client_error());
        assert!(StatusCode::UnavailableForLegalReasons.is_client_error());
        assert!(!StatusCode::InternalServerError.is_client_error());
    }

    #[test]
    fn test_forbids_body() {
        assert!(StatusCode::NoContent.forbids_body());
        assert!(StatusCode::NotModified.forbids_body());
        assert!(StatusCode::Continue.forbids_body());
        assert!(!StatusCode::Ok.forbids_body());
        assert!(!StatusCode::NotFound.forbids_body());
    }

    #[test]
    fn test_display() {
        assert_eq!(StatusCode::Ok.to_string(), "200 OK");
        assert_eq!(StatusCode::NotFound.to_string(), "404 Not Found");
        assert_eq!(StatusCode::InternalServerError.to_string(), "500 Internal Server Error");
    }
}
