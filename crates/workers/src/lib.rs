//! A worker abstraction to create thread pools.

use std::sync::Arc;
use std::thread::JoinHandle;

mod pool;

/// The type used to represent the priority of a task.
///
/// Tasks with a higher priority are handed out first.
pub type Priority = i32;

/// Describes the state of a worker.
///
/// This trait can be implemented by the user to provide custom worker implementations.
pub trait Worker {
    /// The input type of the worker.
    type Input;
    /// The output type of the worker.
    type Output;

    /// Runs the worker with the provided input.
    fn run(&mut self, input: Self::Input) -> Self::Output;
}

/// A handle to a pool of worker threads.
///
/// Dropping the handle stops the workers once they are done with their current task. Tasks that
/// were still waiting are discarded.
pub struct TaskPool<I, O> {
    shared: Arc<pool::Shared<I, O>>,
    threads: Vec<JoinHandle<()>>,
}

impl<I, O> TaskPool<I, O> {
    /// Submits a new task to the task pool.
    #[inline]
    pub fn submit(&self, input: I, priority: Priority) {
        self.shared.submit(input, priority);
    }

    /// Submits a batch of tasks to the task pool.
    #[inline]
    pub fn submit_batch(&self, iter: impl IntoIterator<Item = (I, Priority)>) {
        self.shared.submit_batch(iter);
    }

    /// Returns the results that have been produced by the workers so far.
    #[inline]
    pub fn fetch_results(&self) -> Vec<O> {
        self.shared.take_results()
    }

    /// Blocks until the workers have produced at least `count` results that were not fetched
    /// yet, and returns them.
    ///
    /// # Remarks
    ///
    /// This never returns if fewer than `count` tasks remain to be run.
    #[inline]
    pub fn wait_results(&self, count: usize) -> Vec<O> {
        self.shared.wait_results(count)
    }

    /// Returns the number of tasks that are currently in the queue.
    #[inline]
    pub fn task_count(&self) -> usize {
        self.shared.task_count()
    }

    /// Returns the number of worker threads of the pool.
    #[inline]
    pub fn worker_count(&self) -> usize {
        self.threads.len()
    }

    /// Stops the worker threads and waits for them to exit.
    pub fn join(mut self) {
        self.shared.stop();
        for thread in self.threads.drain(..) {
            if thread.join().is_err() {
                log::error!("a worker thread panicked");
            }
        }
    }
}

impl<I, O> Drop for TaskPool<I, O> {
    fn drop(&mut self) {
        self.shared.stop();
    }
}

/// Starts a collection of worker threads and returns a handle to the task pool.
pub fn start<W, I>(workers: I) -> std::io::Result<TaskPool<W::Input, W::Output>>
where
    I: IntoIterator<Item = W>,
    W: 'static + Send + Worker,
    W::Input: Send,
    W::Output: Send,
{
    let shared = Arc::new(pool::Shared::default());

    let threads = workers
        .into_iter()
        .enumerate()
        .map(|(index, worker)| pool::spawn_worker(shared.clone(), worker, index))
        .collect::<std::io::Result<Vec<_>>>()?;

    Ok(TaskPool { shared, threads })
}
