//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor de archivos estáticos con
//! soporte completo para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./static_server --port 9998 \
//!   --workers 64 \
//!   --public-dir ./public \
//!   --routes /index.html,/styles.css,/app.js
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=9998 HTTP_HOST=0.0.0.0 ./static_server
//! ```

use clap::Parser;

/// Lista de paths servibles por defecto
///
/// Es una lista cerrada: cualquier path fuera de ella recibe 404.
pub const DEFAULT_ROUTES: &str = "/index.html,/spring.svg,/spring.png,/resources.html,/styles.css,/app.js,/links.html,/forms.html,/classic.html,/events.html,/events.js";

/// Configuración del servidor de archivos estáticos
#[derive(Debug, Clone, Parser)]
#[command(name = "static_server")]
#[command(about = "Servidor HTTP concurrente de archivos estáticos")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor (0 = puerto efímero)
    #[arg(short, long, default_value = "9998", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio raíz de los archivos servidos
    #[arg(long = "public-dir", default_value = "./public", env = "PUBLIC_DIR")]
    pub public_dir: String,

    /// Número de workers del pool (máximo de conexiones simultáneas)
    #[arg(short, long, default_value = "64", env = "WORKERS")]
    pub workers: usize,

    /// Allow-list de paths servibles, separados por coma
    #[arg(long, value_delimiter = ',', default_value = DEFAULT_ROUTES, env = "SERVE_ROUTES")]
    pub routes: Vec<String>,

    /// Path del único recurso tratado como plantilla
    #[arg(long = "template-route", default_value = "/classic.html", env = "TEMPLATE_ROUTE")]
    pub template_route: String,

    /// Token de la plantilla que se sustituye por el timestamp actual
    #[arg(long = "template-token", default_value = "{time}", env = "TEMPLATE_TOKEN")]
    pub template_token: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    ///
    /// # Ejemplo
    /// ```ignore
    /// use static_server::config::Config;
    ///
    /// let config = Config::new();
    /// println!("Server listening on {}", config.address());
    /// ```
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use static_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:9998");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("Workers must be >= 1".to_string());
        }

        if self.routes.is_empty() {
            return Err("Route allow-list must not be empty".to_string());
        }

        if self.template_token.is_empty() {
            return Err("Template token must not be empty".to_string());
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("⚙️  Configuración:");
        println!("   Address:       {}", self.address());
        println!("   Public dir:    {}", self.public_dir);
        println!("   Workers:       {}", self.workers);
        println!("   Routes:        {} paths servibles", self.routes.len());
        println!(
            "   Template:      {} (token \"{}\")",
            self.template_route, self.template_token
        );
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 9998,
            host: "127.0.0.1".to_string(),
            public_dir: "./public".to_string(),
            workers: 64,
            routes: DEFAULT_ROUTES.split(',').map(String::from).collect(),
            template_route: "/classic.html".to_string(),
            template_token: "{time}".to_string(),
        }
    }
}
