//! # Parsing de Requests HTTP
//! src/http/request.rs
//!
//! Este módulo implementa el parser de requests del servidor.
//!
//! El parser lee directamente del stream de la conexión, línea por línea:
//!
//! 1. **Request Line**: `METHOD /path?query VERSION` (siempre)
//! 2. **Headers**: pares `Name: Value`, solo para POST
//! 3. **Body**: solo para POST con `Content-Type: application/x-www-form-urlencoded`
//!
//! Para GET se lee únicamente la request line; el resto del stream se ignora.
//! Cualquier error de parsing es terminal: el caller cierra la conexión sin
//! escribir un solo byte de response.

use std::collections::HashMap;
use std::io::BufRead;

use url::form_urlencoded;

/// Content-Type que habilita el parsing del body como form parameters
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// POST - Enviar datos a un recurso (forms url-encoded)
    POST,
}

impl Method {
    /// Parsea un método HTTP desde un string
    ///
    /// # Errores
    ///
    /// Retorna error si el método no es soportado
    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
        }
    }
}

/// Errores que pueden ocurrir durante el parsing
///
/// Todos tienen la misma política: se abandona la conexión en silencio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// El stream se cerró sin entregar una request line
    EmptyRequest,

    /// La request line no tiene exactamente 3 tokens separados por espacio
    InvalidRequestLine,

    /// Método HTTP no soportado
    UnsupportedMethod(String),

    /// Error de I/O leyendo del socket
    Io(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "Empty request"),
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
            ParseError::UnsupportedMethod(m) => write!(f, "Unsupported HTTP method: {}", m),
            ParseError::Io(e) => write!(f, "I/O error reading request: {}", e),
        }
    }
}

impl std::error::Error for ParseError {}

/// Representa un request parseado
///
/// Se construye una sola vez por conexión y se consume de forma síncrona;
/// nunca se comparte entre conexiones ni se muta después de construido.
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP (GET, POST)
    method: Method,

    /// Path de la petición, sin query string (ej: "/index.html")
    path: String,

    /// Versión HTTP tal como llegó; se hace eco en la status line
    version: String,

    /// Query parameters parseados; una key puede repetirse
    /// (ej: {"user": ["ana"], "tag": ["a", "b"]})
    query_params: HashMap<String, Vec<String>>,

    /// Form parameters del body; solo se llenan para POST url-encoded
    form_params: HashMap<String, Vec<String>>,
}

impl Request {
    /// Parsea un request leyendo del stream de la conexión
    ///
    /// # Argumentos
    ///
    /// * `reader` - Reader bufferizado posicionado al inicio de la conexión
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request parseado exitosamente
    /// * `Err(ParseError)` - Error terminal; el caller cierra la conexión
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use static_server::http::Request;
    ///
    /// let mut raw: &[u8] = b"GET /index.html?user=ana HTTP/1.1\r\n\r\n";
    /// let request = Request::read_from(&mut raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/index.html");
    /// assert_eq!(request.query_param("user"), Some("ana"));
    /// ```
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Self, ParseError> {
        // 1. Leer la request line (única línea que se lee para GET)
        let request_line = match Self::read_line(reader)? {
            Some(line) => line,
            None => return Err(ParseError::EmptyRequest),
        };

        // 2. Separar por espacios simples: METHOD TARGET VERSION
        //    Espacios internos extra generan tokens de más (posiblemente
        //    vacíos) y la request se rechaza.
        let parts: Vec<&str> = request_line.split(' ').collect();

        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine);
        }

        let method = Method::from_str(parts[0])?;
        let (path, query_params) = Self::parse_target(parts[1]);
        let version = parts[2].to_string();

        // 3. Solo para POST: leer headers y, si el Content-Type es
        //    url-encoded, el body completo
        let mut form_params = HashMap::new();

        if method == Method::POST {
            let headers = Self::read_headers(reader)?;

            let is_form = headers
                .get("content-type")
                .map(|v| v == FORM_CONTENT_TYPE)
                .unwrap_or(false);

            if is_form {
                let body = Self::read_body(reader)?;
                form_params = Self::parse_url_encoded(&body);
            }
            // Cualquier otro content type deja el body sin leer
        }

        Ok(Request {
            method,
            path,
            version,
            query_params,
            form_params,
        })
    }

    /// Lee una línea del stream, sin terminadores
    ///
    /// Retorna `None` si el stream llegó a end-of-input.
    fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>, ParseError> {
        let mut line = String::new();

        let bytes_read = reader
            .read_line(&mut line)
            .map_err(|e| ParseError::Io(e.to_string()))?;

        if bytes_read == 0 {
            return Ok(None);
        }

        // Quitar \r\n (o \n) del final
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }

        Ok(Some(line))
    }

    /// Separa el request-target en path y query parameters
    ///
    /// Ejemplo: "/index.html?user=ana"
    /// Retorna: ("/index.html", {"user": ["ana"]})
    fn parse_target(target: &str) -> (String, HashMap<String, Vec<String>>) {
        // El primer '?' separa path de query string
        match target.split_once('?') {
            Some((path, query)) => (path.to_string(), Self::parse_url_encoded(query)),
            None => (target.to_string(), HashMap::new()),
        }
    }

    /// Decodifica un string url-encoded en un mapa multi-valor
    ///
    /// Reglas (las estándar de forms):
    /// - Pares separados por '&'; key y value separados por el primer '='
    /// - Un par sin '=' tiene value vacío
    /// - Keys y values se decodifican por porcentaje; '+' es espacio
    /// - Keys repetidas acumulan values en orden de aparición
    /// - Segmentos vacíos (ej: el final de "a=1&") se descartan
    fn parse_url_encoded(input: &str) -> HashMap<String, Vec<String>> {
        let mut params: HashMap<String, Vec<String>> = HashMap::new();

        for (key, value) in form_urlencoded::parse(input.as_bytes()) {
            params
                .entry(key.into_owned())
                .or_default()
                .push(value.into_owned());
        }

        params
    }

    /// Lee los headers hasta la línea vacía que marca su fin
    ///
    /// Los nombres se normalizan a minúsculas (el match es case-insensitive)
    /// y los values se recortan. Líneas sin ':' se ignoran: el único header
    /// que el servidor consulta es Content-Type.
    fn read_headers<R: BufRead>(reader: &mut R) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        loop {
            let line = match Self::read_line(reader)? {
                Some(line) => line,
                // EOF antes de la línea vacía: fin de headers
                None => break,
            };

            if line.trim().is_empty() {
                break;
            }

            if let Some(colon_pos) = line.find(':') {
                let name = line[..colon_pos].trim().to_ascii_lowercase();
                let value = line[colon_pos + 1..].trim().to_string();
                headers.insert(name, value);
            }
        }

        Ok(headers)
    }

    /// Lee el body: todas las líneas restantes hasta end-of-input
    ///
    /// El servidor no consulta Content-Length; el peer marca el fin del body
    /// cerrando su mitad de escritura (cada conexión atiende un solo request).
    fn read_body<R: BufRead>(reader: &mut R) -> Result<String, ParseError> {
        let mut lines = Vec::new();

        while let Some(line) = Self::read_line(reader)? {
            lines.push(line);
        }

        Ok(lines.join("&"))
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el path del request (sin query string)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los query parameters
    pub fn query_params(&self) -> &HashMap<String, Vec<String>> {
        &self.query_params
    }

    /// Obtiene el primer value de un query parameter
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::http::Request;
    ///
    /// let mut raw: &[u8] = b"GET /app.js?v=42 HTTP/1.1\r\n\r\n";
    /// let request = Request::read_from(&mut raw).unwrap();
    ///
    /// assert_eq!(request.query_param("v"), Some("42"));
    /// assert_eq!(request.query_param("missing"), None);
    /// ```
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .get(name)
            .and_then(|values| values.first())
            .map(|s| s.as_str())
    }

    /// Obtiene todos los form parameters
    pub fn form_params(&self) -> &HashMap<String, Vec<String>> {
        &self.form_params
    }

    /// Obtiene el primer value de un form parameter
    pub fn form_param(&self, name: &str) -> Option<&str> {
        self.form_params
            .get(name)
            .and_then(|values| values.first())
            .map(|s| s.as_str())
    }
}
