use std::collections::BinaryHeap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering::Relaxed;
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::{Condvar, Mutex};

use crate::{Priority, Worker};

/// A task with a payload.
struct Task<T> {
    priority: Priority,
    payload: T,
}

impl<T> PartialEq for Task<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl<T> Eq for Task<T> {}

impl<T> PartialOrd for Task<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Task<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority.cmp(&other.priority)
    }
}

/// The state shared between a task pool and its worker threads.
pub struct Shared<I, O> {
    /// The tasks that were submitted, but not taken by a worker just yet.
    tasks: Mutex<BinaryHeap<Task<I>>>,
    /// Notified whenever a task is submitted, and when the pool stops.
    task_ready: Condvar,

    /// The outputs produced by the workers, not collected yet.
    results: Mutex<Vec<O>>,
    /// Notified whenever a worker pushes a result.
    result_ready: Condvar,

    /// Whether the worker threads should stop.
    should_stop: AtomicBool,
}

impl<I, O> Default for Shared<I, O> {
    #[inline]
    fn default() -> Self {
        Self {
            tasks: Mutex::new(BinaryHeap::new()),
            task_ready: Condvar::new(),
            results: Mutex::new(Vec::new()),
            result_ready: Condvar::new(),
            should_stop: AtomicBool::new(false),
        }
    }
}

impl<I, O> Shared<I, O> {
    /// Determines whether worker threads should stop.
    #[inline]
    pub fn should_stop(&self) -> bool {
        self.should_stop.load(Relaxed)
    }

    /// Asks every worker thread to stop once it is done with its current task.
    pub fn stop(&self) {
        // Taking the lock makes sure no worker is between its check and its wait.
        let _lock = self.tasks.lock();
        self.should_stop.store(true, Relaxed);
        self.task_ready.notify_all();
    }

    /// Returns the number of tasks currently waiting for a worker.
    #[inline]
    pub fn task_count(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Fetches a task to execute.
    ///
    /// If no task is available, the function blocks until a new task is submitted.
    ///
    /// If the thread must stop, `None` is returned.
    pub fn fetch_task(&self) -> Option<I> {
        let mut lock = self.tasks.lock();
        loop {
            if self.should_stop() {
                return None;
            }

            match lock.pop() {
                Some(task) => return Some(task.payload),
                None => self.task_ready.wait(&mut lock),
            }
        }
    }

    /// Submits a new task to be executed.
    pub fn submit(&self, payload: I, priority: Priority) {
        let mut lock = self.tasks.lock();
        lock.push(Task { payload, priority });
        self.task_ready.notify_one();
    }

    /// Submits a batch of tasks to be executed.
    pub fn submit_batch(&self, iter: impl IntoIterator<Item = (I, Priority)>) {
        self.tasks.lock().extend(
            iter.into_iter()
                .map(|(payload, priority)| Task { payload, priority }),
        );
        self.task_ready.notify_all();
    }

    /// Adds a result to the list of results.
    pub fn push_result(&self, output: O) {
        self.results.lock().push(output);
        self.result_ready.notify_all();
    }

    /// Takes every result produced so far.
    pub fn take_results(&self) -> Vec<O> {
        std::mem::take(&mut *self.results.lock())
    }

    /// Blocks until at least `count` results are available, then takes all of them.
    pub fn wait_results(&self, count: usize) -> Vec<O> {
        let mut lock = self.results.lock();
        while lock.len() < count {
            self.result_ready.wait(&mut lock);
        }
        std::mem::take(&mut *lock)
    }
}

/// Spawns a new worker thread.
pub fn spawn_worker<W>(
    shared: Arc<Shared<W::Input, W::Output>>,
    mut worker: W,
    index: usize,
) -> std::io::Result<JoinHandle<()>>
where
    W: 'static + Send + Worker,
    W::Output: Send,
    W::Input: Send,
{
    std::thread::Builder::new()
        .name(format!("worker-{index}"))
        .spawn(move || {
            log::trace!("worker {index} started");
            while let Some(task) = shared.fetch_task() {
                let output = worker.run(task);
                shared.push_result(output);
            }
            log::trace!("worker {index} stopped");
        })
}
