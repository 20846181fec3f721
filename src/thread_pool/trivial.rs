use crate::Result;

use super::pool::ThreadPool;

/// The naïve thread pool implementation.
/// `spawn` simply spawns a fresh thread every time and never reuses one.
///
/// It's just a thread factory!
pub struct NaiveThreadPool;

impl ThreadPool for NaiveThreadPool {
    fn new(_size: usize) -> Result<Self> {
        Ok(NaiveThreadPool)
    }

    fn spawn<R>(&self, runnable: R)
    where
        R: 'static + Send + FnOnce(),
    {
        std::thread::spawn(runnable);
    }
}
