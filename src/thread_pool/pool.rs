use crate::Result;

/// the common abstraction of a thread pool.
pub trait ThreadPool: Sized {
    /// create a new thread pool with the specified size.
    fn new(size: usize) -> Result<Self>;
    /// like `thread::spawn`, run a task on this pool.
    fn spawn<R>(&self, runnable: R)
    where
        R: 'static + Send + FnOnce();
}
