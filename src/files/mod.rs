//! # Servido de Archivos Estáticos
//! src/files/mod.rs
//!
//! Este módulo implementa la escritura de responses para paths ya validados:
//!
//! - Resolución del path del request a un archivo bajo el directorio público
//! - Content type por extensión del archivo
//! - Sustitución de plantilla (el token se reemplaza por el timestamp actual)
//! - Streaming del archivo al socket para recursos ordinarios
//!
//! La máquina de estados por request es terminal en la primera rama que
//! aplica: recurso plantilla, recurso ordinario, o 404 para paths fuera de
//! la allow-list. Toda response lleva `Connection: close`.
//!
//! No hay caché de contenidos ni de metadata: cada request resuelve y lee
//! el archivo de nuevo.

use crate::config::Config;
use crate::http::{Request, Response, StatusCode};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

/// Determina el content type de un archivo por su extensión
///
/// Extensiones desconocidas caen a `application/octet-stream` en vez de
/// fallar el request.
///
/// # Ejemplo
/// ```
/// use static_server::files::content_type_for;
/// use std::path::Path;
///
/// assert_eq!(content_type_for(Path::new("/index.html")), "text/html");
/// assert_eq!(content_type_for(Path::new("/spring.bin")), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Resuelve un path de request a una ruta bajo el directorio público
///
/// Concatenación simple: la allow-list ya garantizó que el path es uno de
/// los enumerados, así que no hay sanitización adicional. El `/` inicial se
/// recorta porque `Path::join` con un path absoluto descartaría la base.
pub fn resolve(public_dir: &str, request_path: &str) -> PathBuf {
    Path::new(public_dir).join(request_path.trim_start_matches('/'))
}

/// Timestamp de pared como string ISO-like, independiente del locale
fn current_timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}

/// Escribe la response 404 para un path fuera de la allow-list
///
/// Framing completo: status line (con eco de la versión del request),
/// `Content-Length: 0`, `Connection: close`, body vacío.
pub fn write_not_found<W: Write>(out: &mut W, version: &str) -> io::Result<()> {
    let response = Response::new(StatusCode::NotFound)
        .with_version(version)
        .with_body("")
        .with_header("Connection", "close");

    out.write_all(&response.to_bytes())?;
    out.flush()
}

/// Sirve un recurso ya validado contra la allow-list
///
/// Dos ramas terminales:
/// - **Plantilla** (path == `template_route`): el archivo se lee como texto,
///   cada ocurrencia del token se sustituye por el timestamp actual y el
///   `Content-Length` refleja el tamaño ya sustituido.
/// - **Ordinario**: headers con el tamaño en disco y luego el archivo en
///   streaming, byte a byte idéntico al contenido en disco.
///
/// Un fallo de I/O (archivo desaparecido, permisos, cliente desconectado a
/// mitad de escritura) aborta la response donde estaba: el caller loguea y
/// cierra el socket. Las escrituras parciales no se deshacen.
pub fn serve_resource<W: Write>(
    out: &mut W,
    request: &Request,
    config: &Config,
) -> io::Result<()> {
    let file_path = resolve(&config.public_dir, request.path());
    let content_type = content_type_for(&file_path);

    if request.path() == config.template_route {
        // Rama plantilla: sustituir el token y recalcular el tamaño
        let template = fs::read_to_string(&file_path)?;
        let content = template.replace(&config.template_token, &current_timestamp());

        let response = Response::new(StatusCode::Ok)
            .with_version(request.version())
            .with_header("Content-Type", content_type)
            .with_header("Connection", "close")
            .with_body(&content);

        out.write_all(&response.to_bytes())?;
        return out.flush();
    }

    // Rama ordinaria: headers con el tamaño en disco, body en streaming
    let length = fs::metadata(&file_path)?.len();

    let response = Response::new(StatusCode::Ok)
        .with_version(request.version())
        .with_header("Content-Type", content_type)
        .with_header("Content-Length", &length.to_string())
        .with_header("Connection", "close");

    out.write_all(&response.head_bytes())?;

    let mut file = File::open(&file_path)?;
    io::copy(&mut file, out)?;

    out.flush()
}
