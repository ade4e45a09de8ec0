//! # Campos de escritura única
//!
//! `WriteOnce<T>` acepta únicamente la primera asignación. Los intentos
//! posteriores se ignoran y el valor original se conserva.

use super::ResponseError;

/// Campo que solo puede asignarse una vez
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOnce<T> {
    value: Option<T>,
}

impl<T> WriteOnce<T> {
    /// Crea un campo vacío
    pub const fn new() -> Self {
        Self { value: None }
    }

    /// Asigna el valor si el campo está vacío
    ///
    /// Retorna `true` si la asignación fue aceptada.
    ///
    /// # Ejemplo
    /// ```
    /// use http_responder::http::WriteOnce;
    ///
    /// let mut field = WriteOnce::new();
    /// assert!(field.set(1));
    /// assert!(!field.set(2));
    /// assert_eq!(field.get(), Some(&1));
    /// ```
    pub fn set(&mut self, value: T) -> bool {
        if self.value.is_some() {
            return false;
        }
        self.value = Some(value);
        true
    }

    /// Como `set`, pero corre `validate` antes de aceptar el valor
    ///
    /// Si el campo ya tiene valor, no se valida nada y retorna `Ok(false)`.
    pub fn set_validated<F>(&mut self, value: T, validate: F) -> Result<bool, ResponseError>
    where
        F: FnOnce(&T) -> Result<(), ResponseError>,
    {
        if self.value.is_some() {
            return Ok(false);
        }
        validate(&value)?;
        self.value = Some(value);
        Ok(true)
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }
}

impl<T> Default for WriteOnce<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Option<T>> for WriteOnce<T> {
    fn from(value: Option<T>) -> Self {
        Self { value }
    }
}
