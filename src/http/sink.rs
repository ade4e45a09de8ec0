//! # Sinks de respuesta
//!
//! Un sink es el destino abstracto de la respuesta finalizada: status line,
//! headers y body. El builder solo habla con el sink a través del trait
//! `ResponseSink`.
//!
//! Implementaciones incluidas:
//! - [`Response`](super::Response): sink en memoria que se puede convertir a bytes
//! - [`StreamSink`]: escribe el mensaje HTTP/1.0 completo en cualquier `Write`
//!   (un `TcpStream`, stdout, un `Vec<u8>`...)

use super::Response;
use std::io::{self, Write};

/// Destino de una respuesta HTTP
///
/// `end` es la escritura terminal y solo puede invocarse una vez por instancia;
/// una segunda llamada debe retornar error.
pub trait ResponseSink {
    /// Valor actual de un header (nombre sin distinguir mayúsculas)
    fn header(&self, name: &str) -> Option<String>;

    fn set_header(&mut self, name: &str, value: &str);

    fn remove_header(&mut self, name: &str);

    fn status_code(&self) -> u16;

    fn set_status_code(&mut self, code: u16);

    fn status_message(&self) -> Option<String>;

    fn set_status_message(&mut self, message: &str);

    /// Escribe el body (UTF-8) y cierra el sink
    fn end(&mut self, body: &str) -> io::Result<()>;
}

/// Sink que serializa la respuesta a un `Write` al finalizar
///
/// Los headers y el status se acumulan en memoria; en `end` se escribe el
/// mensaje completo de una sola vez y se hace flush.
#[derive(Debug)]
pub struct StreamSink<W: Write> {
    head: Response,
    writer: W,
}

impl<W: Write> StreamSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            head: Response::default(),
            writer,
        }
    }

    /// Estado acumulado (status, headers, body una vez finalizado)
    pub fn response(&self) -> &Response {
        &self.head
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResponseSink for StreamSink<W> {
    fn header(&self, name: &str) -> Option<String> {
        self.head.header(name)
    }

    fn set_header(&mut self, name: &str, value: &str) {
        self.head.set_header(name, value);
    }

    fn remove_header(&mut self, name: &str) {
        self.head.remove_header(name);
    }

    fn status_code(&self) -> u16 {
        self.head.status_code()
    }

    fn set_status_code(&mut self, code: u16) {
        self.head.set_status_code(code);
    }

    fn status_message(&self) -> Option<String> {
        self.head.status_message()
    }

    fn set_status_message(&mut self, message: &str) {
        self.head.set_status_message(message);
    }

    fn end(&mut self, body: &str) -> io::Result<()> {
        self.head.end(body)?;
        self.writer.write_all(&self.head.to_bytes())?;
        self.writer.flush()
    }
}
