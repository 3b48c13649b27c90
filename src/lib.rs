//! # Static Server
//! src/lib.rs
//!
//! Servidor HTTP concurrente de archivos estáticos implementado desde cero.
//! Sirve un conjunto cerrado de archivos desde un directorio local y parsea
//! query strings (GET) y bodies url-encoded (POST).
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing de requests y construcción de responses HTTP
//! - `server`: Lógica del servidor TCP y manejo de conexiones
//! - `routes`: Lista cerrada de paths servibles (allow-list)
//! - `files`: Resolución de archivos, content type y escritura de responses
//! - `workers`: Pool de threads de tamaño fijo para atender conexiones
//! - `config`: Configuración por CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```ignore
//! use static_server::server::Server;
//! use static_server::config::Config;
//!
//! let config = Config::default();
//! let server = Server::bind(config).expect("Error al iniciar servidor");
//! server.run().expect("Error fatal del servidor");
//! ```

pub mod http;
pub mod config;
pub mod server;
pub mod routes;
pub mod files;
pub mod workers;
