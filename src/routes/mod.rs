//! # Allow-list de Paths Servibles
//! src/routes/mod.rs
//!
//! Este módulo implementa la lista cerrada de paths que el servidor sirve.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → AllowList → servir archivo | 404 Not Found
//! ```
//!
//! La validación es un match exacto de strings: sin normalización, sin
//! tolerancia a slashes finales, case-sensitive. Como solo los paths
//! enumerados se resuelven a un archivo, la lista cerrada es la única
//! frontera de seguridad que el servidor necesita (no hay resolución de
//! directory traversal).
//!
//! La lista se construye una vez al arranque desde la configuración y es
//! inmutable: todos los handlers la comparten detrás de un `Arc` sin ningún
//! tipo de lock.

use std::collections::HashSet;

/// Conjunto cerrado e inmutable de paths servibles
#[derive(Debug, Clone)]
pub struct AllowList {
    /// Paths exactos admitidos (ej: "/index.html")
    paths: HashSet<String>,
}

impl AllowList {
    /// Construye la allow-list desde los paths configurados
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::routes::AllowList;
    ///
    /// let allow = AllowList::new(&["/index.html".to_string()]);
    /// assert!(allow.contains("/index.html"));
    /// ```
    pub fn new(paths: &[String]) -> Self {
        Self {
            paths: paths.iter().cloned().collect(),
        }
    }

    /// Verifica si un path está admitido
    ///
    /// Match exacto y case-sensitive; cualquier diferencia es un rechazo.
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::routes::AllowList;
    ///
    /// let allow = AllowList::new(&["/index.html".to_string()]);
    ///
    /// assert!(allow.contains("/index.html"));
    /// assert!(!allow.contains("/Index.html"));
    /// assert!(!allow.contains("/index.html/"));
    /// ```
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Retorna la cantidad de paths admitidos
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Verifica si la lista está vacía
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
