//! # Pool de Threads con Submit Bloqueante
//! src/workers/pool.rs
//!
//! Implementa un pool de N threads sobre una cola compartida protegida por
//! `Mutex` + `Condvar`. Dos condiciones distintas:
//!
//! - `job_available`: despierta workers cuando se encola un job
//! - `slot_available`: despierta al submitter cuando un worker se libera
//!
//! `execute` bloquea mientras haya N jobs en el sistema (encolados más en
//! ejecución), de modo que nunca hay más de N conexiones en vuelo.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

/// Tarea que ejecuta un worker
type Job = Box<dyn FnOnce() + Send + 'static>;

/// Estado compartido entre el pool y sus workers
struct PoolState {
    /// Jobs encolados a la espera de un worker
    queue: VecDeque<Job>,

    /// Jobs actualmente en ejecución
    active: usize,

    /// Señal de apagado: los workers drenan la cola y terminan
    shutdown: bool,
}

/// Sincronización compartida del pool
struct PoolShared {
    state: Mutex<PoolState>,
    job_available: Condvar,
    slot_available: Condvar,
    size: usize,
}

/// Pool de threads de tamaño fijo
///
/// Al hacer drop, el pool señala apagado, espera a que los workers drenen
/// los jobs pendientes y hace join de todos los threads.
pub struct ThreadPool {
    shared: Arc<PoolShared>,
    handles: Vec<JoinHandle<()>>,
}

impl ThreadPool {
    /// Crea un pool con `size` workers
    ///
    /// `size` debe ser >= 1 (`Config::validate` lo garantiza antes de
    /// llegar aquí).
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::workers::ThreadPool;
    ///
    /// let pool = ThreadPool::new(4);
    /// pool.execute(|| println!("hola desde un worker"));
    /// ```
    pub fn new(size: usize) -> Self {
        let shared = Arc::new(PoolShared {
            state: Mutex::new(PoolState {
                queue: VecDeque::new(),
                active: 0,
                shutdown: false,
            }),
            job_available: Condvar::new(),
            slot_available: Condvar::new(),
            size,
        });

        let mut handles = Vec::with_capacity(size);

        for _ in 0..size {
            let shared = Arc::clone(&shared);
            handles.push(thread::spawn(move || Self::worker_loop(shared)));
        }

        Self { shared, handles }
    }

    /// Encola un job; bloquea mientras los N workers estén ocupados
    ///
    /// El job se ejecutará en algún worker del pool. Si hay N jobs en el
    /// sistema (encolados + activos), el caller queda bloqueado hasta que
    /// un worker se libere.
    pub fn execute<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.shared.state.lock().unwrap();

        // Submit bloqueante: nunca más de `size` jobs en el sistema
        while state.queue.len() + state.active >= self.shared.size {
            state = self.shared.slot_available.wait(state).unwrap();
        }

        state.queue.push_back(Box::new(job));
        drop(state);

        self.shared.job_available.notify_one();
    }

    /// Retorna el tamaño del pool (máximo de jobs simultáneos)
    pub fn size(&self) -> usize {
        self.shared.size
    }

    /// Loop de cada worker: tomar un job, ejecutarlo, liberar el slot
    fn worker_loop(shared: Arc<PoolShared>) {
        loop {
            let job = {
                let mut state = shared.state.lock().unwrap();

                loop {
                    if let Some(job) = state.queue.pop_front() {
                        state.active += 1;
                        break job;
                    }

                    // Cola vacía: terminar si hay apagado, si no esperar
                    if state.shutdown {
                        return;
                    }

                    state = shared.job_available.wait(state).unwrap();
                }
            };

            job();

            let mut state = shared.state.lock().unwrap();
            state.active -= 1;
            drop(state);

            shared.slot_available.notify_one();
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        {
            let mut state = self.shared.state.lock().unwrap();
            state.shutdown = true;
        }

        // Despertar workers dormidos para que vean el apagado
        self.shared.job_available.notify_all();

        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}
