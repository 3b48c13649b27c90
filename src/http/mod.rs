//! # Módulo HTTP
//!
//! Este módulo implementa el subconjunto de HTTP que el servidor necesita,
//! sin usar librerías de alto nivel. Incluye:
//!
//! - Parsing de requests desde el stream de la conexión
//! - Construcción de responses HTTP
//! - Manejo de status codes
//! - Extracción de query parameters y form parameters
//!
//! ## Alcance del protocolo
//!
//! Solo se parsea la request line; para POST se leen además los headers y
//! (si el Content-Type es url-encoded) el body. Todos los demás headers del
//! request se ignoran. No hay conexiones persistentes: cada response lleva
//! `Connection: close` y la conexión termina ahí.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path?query=value HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! Connection: close\r\n
//! \r\n
//! <html>...</html>
//! ```

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
