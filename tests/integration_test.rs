//! Tests de integración para el servidor de archivos estáticos
//! tests/integration_test.rs
//!
//! Cada test levanta un servidor real en un puerto efímero, con un
//! directorio público temporal propio, y habla HTTP crudo por TcpStream.
//! No requieren ningún proceso externo corriendo.

use static_server::config::Config;
use static_server::server::Server;
use std::fs;
use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

const INDEX_BODY: &str = "<html><body>INDEX</body></html>";
const CSS_BODY: &str = "body { margin: 0; }";
const APP_JS_BODY: &str = "console.log('app');";
const EVENTS_JS_BODY: &str = "console.log('events');";
const FORMS_BODY: &str = "<form method=\"post\"></form>";
const CLASSIC_BODY: &str = "<html><h1>{time}</h1><p>{time}</p></html>";
const PNG_BODY: [u8; 10] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0xFF];

/// Crea un directorio público temporal único con los archivos servibles
fn setup_public_dir() -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    let dir = std::env::temp_dir().join(format!(
        "static_server_integration_{}_{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    fs::create_dir_all(&dir).expect("crear directorio público temporal");

    fs::write(dir.join("index.html"), INDEX_BODY).unwrap();
    fs::write(dir.join("styles.css"), CSS_BODY).unwrap();
    fs::write(dir.join("app.js"), APP_JS_BODY).unwrap();
    fs::write(dir.join("events.js"), EVENTS_JS_BODY).unwrap();
    fs::write(dir.join("forms.html"), FORMS_BODY).unwrap();
    fs::write(dir.join("classic.html"), CLASSIC_BODY).unwrap();
    fs::write(dir.join("spring.png"), PNG_BODY).unwrap();

    dir
}

/// Levanta el servidor en un puerto efímero y retorna su dirección
fn start_server(workers: usize) -> SocketAddr {
    let dir = setup_public_dir();

    let mut config = Config::default();
    config.port = 0;
    config.public_dir = dir.to_str().unwrap().to_string();
    config.workers = workers;

    let server = Server::bind(config).expect("bind del servidor");
    let addr = server.local_addr().expect("local_addr");

    // El loop de accept corre hasta que el proceso del test termine
    thread::spawn(move || {
        let _ = server.run();
    });

    addr
}

/// Helper: envía bytes crudos y retorna la response completa
fn send_raw(addr: SocketAddr, raw: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).expect("connect");

    // Timeouts del lado cliente para que un test roto no cuelgue
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    stream
        .set_write_timeout(Some(Duration::from_secs(5)))
        .unwrap();

    stream.write_all(raw).expect("write request");
    stream.flush().unwrap();
    // Señalar fin del request cerrando la mitad de escritura
    stream.shutdown(Shutdown::Write).unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).expect("read response");
    response
}

/// Helper: GET simple a un path
fn get(addr: SocketAddr, path: &str) -> Vec<u8> {
    send_raw(addr, format!("GET {} HTTP/1.1\r\n\r\n", path).as_bytes())
}

/// Helper: separa una response en (head, body)
fn split_response(raw: &[u8]) -> (String, Vec<u8>) {
    let pos = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response sin separador de headers");
    (
        String::from_utf8(raw[..pos + 4].to_vec()).unwrap(),
        raw[pos + 4..].to_vec(),
    )
}

/// Helper: extrae el value de un header del head
fn header_value(head: &str, name: &str) -> Option<String> {
    head.lines()
        .filter_map(|line| line.split_once(": "))
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.trim().to_string())
}

#[test]
fn test_allowed_resource_roundtrip() {
    let addr = start_server(4);

    let (head, body) = split_response(&get(addr, "/index.html"));

    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(header_value(&head, "Content-Type").unwrap(), "text/html");
    assert_eq!(header_value(&head, "Connection").unwrap(), "close");
    // Round-trip exacto: el body es idéntico al archivo en disco
    assert_eq!(body, INDEX_BODY.as_bytes());
    assert_eq!(
        header_value(&head, "Content-Length").unwrap(),
        body.len().to_string()
    );
}

#[test]
fn test_binary_resource_byte_identical() {
    let addr = start_server(4);

    let (head, body) = split_response(&get(addr, "/spring.png"));

    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(header_value(&head, "Content-Type").unwrap(), "image/png");
    assert_eq!(body, PNG_BODY);
}

#[test]
fn test_unknown_path_returns_404_empty() {
    let addr = start_server(4);

    let (head, body) = split_response(&get(addr, "/secreto.html"));

    assert!(head.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert_eq!(header_value(&head, "Content-Length").unwrap(), "0");
    assert_eq!(header_value(&head, "Connection").unwrap(), "close");
    assert!(body.is_empty());
}

#[test]
fn test_unknown_path_404_with_query_and_post() {
    let addr = start_server(4);

    // 404 independiente del método y del query string
    let (head, body) = split_response(&get(addr, "/secreto.html?a=1&b=2"));
    assert!(head.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(body.is_empty());

    let (head, body) =
        split_response(&send_raw(addr, b"POST /secreto.html HTTP/1.1\r\n\r\n"));
    assert!(head.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(body.is_empty());
}

#[test]
fn test_case_sensitive_allow_list() {
    let addr = start_server(4);

    let (head, _) = split_response(&get(addr, "/Index.html"));
    assert!(head.starts_with("HTTP/1.1 404 Not Found\r\n"));
}

#[test]
fn test_template_substitution() {
    let addr = start_server(4);

    let (head, body) = split_response(&get(addr, "/classic.html"));
    let body_str = String::from_utf8(body.clone()).unwrap();

    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    // Ninguna ocurrencia del token sobrevive a la sustitución
    assert!(!body_str.contains("{time}"));
    // Content-Length refleja el tamaño post-sustitución
    assert_eq!(
        header_value(&head, "Content-Length").unwrap(),
        body.len().to_string()
    );
    // El contenido ya no mide lo mismo que el archivo en disco
    assert_ne!(body.len(), CLASSIC_BODY.len());
}

#[test]
fn test_query_string_does_not_affect_validation() {
    let addr = start_server(4);

    let (head, body) = split_response(&get(addr, "/app.js?v=3&v=4&debug"));

    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(body, APP_JS_BODY.as_bytes());
}

#[test]
fn test_post_form_urlencoded_served() {
    let addr = start_server(4);

    let raw = b"POST /forms.html HTTP/1.1\r\n\
                Content-Type: application/x-www-form-urlencoded\r\n\
                \r\n\
                x=hello&x=world";
    let (head, body) = split_response(&send_raw(addr, raw));

    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(body, FORMS_BODY.as_bytes());
}

#[test]
fn test_post_text_plain_body_ignored() {
    let addr = start_server(4);

    let raw = b"POST /forms.html HTTP/1.1\r\n\
                Content-Type: text/plain\r\n\
                \r\n\
                x=hello&x=world";
    let (head, body) = split_response(&send_raw(addr, raw));

    // El body no se parsea pero el recurso se sirve igual
    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(body, FORMS_BODY.as_bytes());
}

#[test]
fn test_malformed_request_line_closes_silently() {
    let addr = start_server(4);

    // Falta el token de versión
    let response = send_raw(addr, b"GET /index.html\r\n\r\n");
    assert!(response.is_empty());

    // Espacio interno doble: tokens de más
    let response = send_raw(addr, b"GET  /index.html HTTP/1.1\r\n\r\n");
    assert!(response.is_empty());

    // Método no soportado
    let response = send_raw(addr, b"DELETE /index.html HTTP/1.1\r\n\r\n");
    assert!(response.is_empty());
}

#[test]
fn test_connection_closes_after_each_response() {
    let addr = start_server(4);

    // read_to_end retornó: el servidor cerró tras una response.
    // Una segunda conexión funciona igual (sin keep-alive).
    let (head, _) = split_response(&get(addr, "/index.html"));
    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));

    let (head, _) = split_response(&get(addr, "/styles.css"));
    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
}

#[test]
fn test_concurrent_connections_distinct_resources() {
    let addr = start_server(4);

    let resources = [
        ("/index.html", INDEX_BODY.as_bytes()),
        ("/styles.css", CSS_BODY.as_bytes()),
        ("/app.js", APP_JS_BODY.as_bytes()),
        ("/events.js", EVENTS_JS_BODY.as_bytes()),
    ];

    let mut handles = Vec::new();

    for (path, expected) in resources {
        handles.push(thread::spawn(move || {
            let (head, body) = split_response(&get(addr, path));
            assert!(head.starts_with("HTTP/1.1 200 OK\r\n"), "fallo en {}", path);
            // Bodies correctos y sin entrelazar
            assert_eq!(body, expected, "body corrupto en {}", path);
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_more_connections_than_workers() {
    // Pool chico a propósito: las conexiones por encima de N solo esperan
    let addr = start_server(2);

    let resources = [
        ("/index.html", INDEX_BODY.as_bytes()),
        ("/styles.css", CSS_BODY.as_bytes()),
        ("/app.js", APP_JS_BODY.as_bytes()),
        ("/events.js", EVENTS_JS_BODY.as_bytes()),
    ];

    let mut handles = Vec::new();

    for i in 0..12 {
        let (path, expected) = resources[i % resources.len()];
        handles.push(thread::spawn(move || {
            let (head, body) = split_response(&get(addr, path));
            assert!(head.starts_with("HTTP/1.1 200 OK\r\n"), "fallo en {}", path);
            assert_eq!(body, expected, "body corrupto en {}", path);
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
}
