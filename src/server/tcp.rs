//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que maneja múltiples conexiones
//! simultáneas usando un pool de workers de tamaño fijo. Cada conexión se
//! procesa completa (parsear → validar → responder) en un único worker y
//! termina cerrando el socket, pase lo que pase.
//!
//! Ningún error de una conexión afecta a otra, al pool ni al listener.

use crate::config::Config;
use crate::files;
use crate::http::Request;
use crate::routes::AllowList;
use crate::workers::ThreadPool;
use std::io::{BufReader, BufWriter};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;

/// Servidor HTTP concurrente de archivos estáticos
pub struct Server {
    config: Arc<Config>,
    allow_list: Arc<AllowList>,
    listener: TcpListener,
}

impl Server {
    /// Bindea el socket de escucha según la configuración
    ///
    /// Se separa de `run` para que los tests puedan bindear el puerto 0
    /// (efímero) y consultar la dirección real con `local_addr` antes de
    /// arrancar el loop de accept.
    pub fn bind(config: Config) -> std::io::Result<Self> {
        let address = config.address();
        let listener = TcpListener::bind(&address)?;

        println!("[+] Servidor escuchando en {}", listener.local_addr()?);

        Ok(Self {
            allow_list: Arc::new(AllowList::new(&config.routes)),
            config: Arc::new(config),
            listener,
        })
    }

    /// Dirección real en la que quedó escuchando el socket
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Loop de accept: corre hasta que el proceso termine
    ///
    /// Cada conexión aceptada se entrega al pool; si los N workers están
    /// ocupados el submit bloquea y el accept se detiene hasta que uno se
    /// libere. Un accept fallido se loguea y el loop continúa: nunca es
    /// fatal para el listener.
    pub fn run(self) -> std::io::Result<()> {
        println!("[*] Modo concurrente: pool de {} workers\n", self.config.workers);

        let pool = ThreadPool::new(self.config.workers);

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    let config = Arc::clone(&self.config);
                    let allow_list = Arc::clone(&self.allow_list);

                    let peer_addr = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());

                    println!("   ✅ Nueva conexión desde: {}", peer_addr);

                    pool.execute(move || {
                        if let Err(e) = Self::handle_connection(stream, &config, &allow_list) {
                            eprintln!("   ❌ Error en conexión: {}", e);
                        }
                    });
                }
                Err(e) => {
                    eprintln!("   ❌ Error al aceptar conexión: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Pipeline de una conexión: parsear → validar → responder
    ///
    /// Es la única frontera de manejo de errores por conexión:
    /// - Request malformado: se cierra el socket sin escribir bytes
    /// - Path fuera de la allow-list: 404 bien formado y cierre
    /// - Fallo de I/O sirviendo el archivo: el error sube, se loguea en el
    ///   worker y el socket se cierra igual (response posiblemente trunca)
    ///
    /// El socket se cierra exactamente una vez, al salir de esta función,
    /// en todos los caminos.
    fn handle_connection(
        stream: TcpStream,
        config: &Config,
        allow_list: &AllowList,
    ) -> std::io::Result<()> {
        let mut reader = BufReader::new(stream.try_clone()?);
        let mut writer = BufWriter::new(stream);

        let request = match Request::read_from(&mut reader) {
            Ok(request) => request,
            Err(e) => {
                // Abandonar en silencio: cero bytes de response
                println!("   ❌ Request malformado: {}", e);
                return Ok(());
            }
        };

        println!("   ✅ {} {}", request.method().as_str(), request.path());

        if !allow_list.contains(request.path()) {
            println!("   ❌ 404 {}", request.path());
            return files::write_not_found(&mut writer, request.version());
        }

        files::serve_resource(&mut writer, &request, config)?;
        println!("   ✅ 200 {}", request.path());

        Ok(())
    }
}
