//! # Static Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor de archivos estáticos.
//!
//! La configuración se toma de argumentos CLI y variables de entorno.

use static_server::config::Config;
use static_server::server::Server;

fn main() {
    println!("=================================");
    println!("  Static File Server");
    println!("=================================\n");

    // Parsear configuración desde CLI / env
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("[!] Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary();

    // Bindear el socket y arrancar el servidor (esto bloqueará el thread)
    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("[!] No se pudo bindear el socket: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        eprintln!("[!] Error fatal: {}", e);
        std::process::exit(1);
    }
}
