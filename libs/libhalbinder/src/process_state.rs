// Copyright 2024, The Android Open Source Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Threads that deliver asynchronous calls to services and callbacks.

use crossbeam_channel::{Receiver, Sender};
use log::{debug, error};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{LazyLock, Mutex};
use std::thread::{self, JoinHandle};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A fixed set of threads running queued jobs.
///
/// With a single thread, jobs run in the order they were dispatched. A job that panics is logged
/// and does not take its thread down. Dropping the pool waits for queued jobs to finish.
struct ThreadPool {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl ThreadPool {
    /// Starts `size` threads named `<name>_<n>`. A size of zero is treated as one.
    fn new(name: &str, size: usize) -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded::<Job>();
        let workers = (0..size.max(1))
            .filter_map(|n| {
                let receiver = receiver.clone();
                thread::Builder::new()
                    .name(format!("{name}_{n}"))
                    .spawn(move || run_worker(receiver))
                    .map_err(|e| error!("Failed to spawn {name}_{n}: {e}"))
                    .ok()
            })
            .collect();
        Self { sender: Some(sender), workers }
    }

    fn size(&self) -> usize {
        self.workers.len()
    }

    /// Queues `job` to run on one of the pool's threads.
    fn dispatch<F: FnOnce() + Send + 'static>(&self, job: F) {
        let Some(sender) = &self.sender else { return };
        if sender.send(Box::new(job)).is_err() {
            error!("Dispatch thread pool has no running threads, dropping job");
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        drop(self.sender.take());
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                error!("Dispatch thread exited abnormally");
            }
        }
    }
}

fn run_worker(receiver: Receiver<Job>) {
    for job in receiver {
        if let Err(e) = panic::catch_unwind(AssertUnwindSafe(job)) {
            let message = e
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| e.downcast_ref::<String>().cloned())
                .unwrap_or_default();
            error!("Dispatched call panicked: {message}");
        }
    }
    debug!("Dispatch queue closed, exiting");
}

const DEFAULT_MAX_THREADS: usize = 1;

struct PoolState {
    max_threads: usize,
    pool: Option<ThreadPool>,
}

static STATE: LazyLock<Mutex<PoolState>> =
    LazyLock::new(|| Mutex::new(PoolState { max_threads: DEFAULT_MAX_THREADS, pool: None }));

/// Process wide dispatch thread pool.
pub struct ProcessState;

impl ProcessState {
    /// Sets how many threads [`ProcessState::start_thread_pool`] starts. Returns false, and
    /// changes nothing, once the pool is running.
    pub fn set_thread_pool_max_thread_count(num_threads: u32) -> bool {
        let mut state = STATE.lock().unwrap();
        if state.pool.is_some() {
            return false;
        }
        state.max_threads = num_threads as usize;
        true
    }

    /// Starts the thread pool. Does nothing if it is already running.
    pub fn start_thread_pool() {
        let mut state = STATE.lock().unwrap();
        if state.pool.is_none() {
            let name = format!("binder:{}", std::process::id());
            let pool = ThreadPool::new(&name, state.max_threads);
            debug!("Started {} dispatch threads", pool.size());
            state.pool = Some(pool);
        }
    }

    /// Number of running dispatch threads, 0 before the pool is started.
    pub fn thread_pool_size() -> usize {
        STATE.lock().unwrap().pool.as_ref().map_or(0, ThreadPool::size)
    }

    /// Runs `job` asynchronously on the dispatch thread pool, starting the pool if needed.
    pub fn dispatch<F: FnOnce() + Send + 'static>(job: F) {
        Self::start_thread_pool();
        if let Some(pool) = &STATE.lock().unwrap().pool {
            pool.dispatch(job);
        }
    }
}
