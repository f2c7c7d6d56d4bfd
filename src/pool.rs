//! Worker Pool
//!
//! Fans a fully enumerated work list out to a dedicated rayon thread pool of a
//! fixed size. Each result is sent back over a channel and handed to the
//! caller's consumer on the calling thread, in arrival order.
//!
//! The consumer also receives a [`PoolEvent::Tick`] once per tick interval, even
//! while results keep arriving, so it can report liveness when items are slow.

use crate::error::Result;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Default interval between [`PoolEvent::Tick`]s
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Something the pool hands to its consumer
#[derive(Debug)]
pub enum PoolEvent<R> {
    /// One item finished
    Completed(R),
    /// A tick interval elapsed
    Tick,
}

/// Fixed-size thread pool over a finite work list
#[derive(Debug, Clone)]
pub struct WorkerPool {
    workers: usize,
    tick: Duration,
}

/// Number of workers to use when none is configured
pub fn default_worker_count() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl WorkerPool {
    /// A pool of `workers` threads; zero is treated as one.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            tick: DEFAULT_TICK,
        }
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `work` over every item, feeding results and ticks to `on_event`.
    ///
    /// Returns after every item has been processed and every result has been
    /// passed to `on_event`. Fails only if the thread pool cannot be started.
    /// A panic in `work` is propagated once the pool has stopped.
    pub fn run<T, R, W, C>(&self, items: &[T], work: W, mut on_event: C) -> Result<()>
    where
        T: Sync,
        R: Send,
        W: Fn(&T) -> R + Sync,
        C: FnMut(PoolEvent<R>),
    {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.workers.min(items.len()).max(1))
            .thread_name(|i| format!("cratelink-worker-{}", i))
            .build()?;

        thread::scope(|scope| {
            let (tx, rx) = mpsc::channel();
            let work = &work;
            let pool = &pool;
            scope.spawn(move || {
                pool.install(|| {
                    items.par_iter().for_each_with(tx, |tx, item| {
                        // The receiver outlives the pool; a failed send means it panicked.
                        let _ = tx.send(work(item));
                    });
                });
            });

            let mut next_tick = Instant::now() + self.tick;
            loop {
                let timeout = next_tick.saturating_duration_since(Instant::now());
                match rx.recv_timeout(timeout) {
                    Ok(result) => on_event(PoolEvent::Completed(result)),
                    Err(mpsc::RecvTimeoutError::Timeout) => {}
                    Err(mpsc::RecvTimeoutError::Disconnected) => break,
                }
                if Instant::now() >= next_tick {
                    on_event(PoolEvent::Tick);
                    next_tick = Instant::now() + self.tick;
                }
            }
        });
        Ok(())
    }
}
