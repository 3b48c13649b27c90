//! # Pool de Workers
//! src/workers/mod.rs
//!
//! Este módulo implementa el pool de threads de tamaño fijo que atiende las
//! conexiones. El contrato esencial:
//!
//! - Exactamente N workers concurrentes (N configurable)
//! - El submit **bloquea** cuando los N están ocupados: el accept loop se
//!   detiene en vez de descartar conexiones o encolar sin límite
//!
//! Esto acota la memoria y el número de conexiones en vuelo; una ráfaga de
//! conexiones por encima de N solo agrega latencia, nunca pérdida.

pub mod pool;

pub use pool::ThreadPool;
