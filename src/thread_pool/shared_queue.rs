use std::collections::VecDeque;
use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::error;

use crate::thread_pool::pool::ThreadPool;
use crate::Result;

type Task = Box<dyn FnOnce() + Send + 'static>;

enum ToMaster {
    Submit(Task),
    Done(Worker),
    Died,
    Shutdown(Sender<()>),
}

enum ToWorker {
    Run(Task),
    Exit,
}

/// An implementation of `ThreadPool` holding one shared waiting queue.
///
/// A master thread owns the queue and a list of idle workers; every worker
/// reports back when its task is done, so the master can either hand it the
/// next waiting task or park it. A worker that panics is detected through a
/// drop sentinel and replaced, so the pool never shrinks below its size.
#[derive(Clone)]
pub struct SharedQueueThreadPool(Sender<ToMaster>);

impl SharedQueueThreadPool {
    /// stop accepting new tasks and wait for the running ones to finish.
    /// The returned receiver fires once every worker has exited.
    pub fn shutdown(&self) -> Receiver<()> {
        let (ack, done) = unbounded();
        let _ = self.0.send(ToMaster::Shutdown(ack));
        done
    }
}

impl ThreadPool for SharedQueueThreadPool {
    fn new(size: usize) -> Result<Self> {
        Ok(Master::new(size).start())
    }

    fn spawn<R>(&self, runnable: R)
    where
        R: 'static + Send + FnOnce(),
    {
        self.0
            .send(ToMaster::Submit(Box::new(runnable)))
            .expect("spawn on a pool whose master is gone");
    }
}

struct Master {
    waiting: VecDeque<Task>,
    idle: VecDeque<Worker>,
    size: usize,
    live: usize,
    shutdown_ack: Option<Sender<()>>,
}

impl Master {
    fn new(size: usize) -> Self {
        Master {
            waiting: VecDeque::new(),
            idle: VecDeque::new(),
            size,
            live: 0,
            shutdown_ack: None,
        }
    }

    fn start(mut self) -> SharedQueueThreadPool {
        let (sender, mailbox) = unbounded();
        for _ in 0..self.size {
            self.idle.push_back(Worker::start(sender.clone()));
            self.live += 1;
        }
        let master_sender = sender.clone();
        thread::Builder::new()
            .name("memkv-pool-master".to_owned())
            .spawn(move || {
                for message in mailbox.iter() {
                    if !self.handle(message, &master_sender) {
                        break;
                    }
                }
            })
            .expect("failed to spawn the pool master thread");
        SharedQueueThreadPool(sender)
    }

    /// react to one message; false ends the master loop.
    fn handle(&mut self, message: ToMaster, sender: &Sender<ToMaster>) -> bool {
        match message {
            ToMaster::Submit(task) => {
                if self.shutdown_ack.is_some() {
                    error!(target: "app::error", "task submitted to a pool that is shutting down, dropping it.");
                    return true;
                }
                match self.idle.pop_front() {
                    Some(worker) => worker.run(task),
                    None => self.waiting.push_back(task),
                }
            }
            ToMaster::Done(worker) => match self.waiting.pop_front() {
                Some(task) => worker.run(task),
                None if self.shutdown_ack.is_some() => {
                    worker.exit();
                    self.live -= 1;
                    return self.maybe_finish();
                }
                None => self.idle.push_back(worker),
            },
            ToMaster::Died => {
                self.live -= 1;
                if self.shutdown_ack.is_some() && self.waiting.is_empty() {
                    return self.maybe_finish();
                }
                error!(target: "app::error", "a pool worker panicked, recruiting a replacement.");
                let worker = Worker::start(sender.clone());
                self.live += 1;
                match self.waiting.pop_front() {
                    Some(task) => worker.run(task),
                    None => self.idle.push_back(worker),
                }
            }
            ToMaster::Shutdown(ack) => {
                if self.shutdown_ack.is_some() {
                    return true;
                }
                // tasks can only be waiting when no worker is idle, so
                // exiting the idle ones never strands queued work.
                while let Some(worker) = self.idle.pop_front() {
                    worker.exit();
                    self.live -= 1;
                }
                self.shutdown_ack = Some(ack);
                return self.maybe_finish();
            }
        }
        true
    }

    /// during shutdown: once no worker is left, fire the ack and stop.
    fn maybe_finish(&mut self) -> bool {
        if self.live > 0 {
            return true;
        }
        if let Some(ack) = self.shutdown_ack.take() {
            let _ = ack.send(());
        }
        false
    }
}

#[derive(Clone)]
struct Worker(Sender<ToWorker>);

/// reports a panicked worker thread back to the master.
struct Sentinel(Sender<ToMaster>);

impl Drop for Sentinel {
    fn drop(&mut self) {
        if thread::panicking() {
            let _ = self.0.send(ToMaster::Died);
        }
    }
}

impl Worker {
    fn start(master: Sender<ToMaster>) -> Worker {
        let (sender, inbox) = unbounded::<ToWorker>();
        let worker = Worker(sender);
        let me = worker.clone();
        thread::Builder::new()
            .name("memkv-pool-worker".to_owned())
            .spawn(move || {
                let _sentinel = Sentinel(master.clone());
                while let Ok(message) = inbox.recv() {
                    match message {
                        ToWorker::Run(task) => {
                            task();
                            if master.send(ToMaster::Done(me.clone())).is_err() {
                                break;
                            }
                        }
                        ToWorker::Exit => break,
                    }
                }
            })
            .expect("failed to spawn a pool worker thread");
        worker
    }

    fn run(&self, task: Task) {
        let _ = self.0.send(ToWorker::Run(task));
    }

    fn exit(&self) {
        let _ = self.0.send(ToWorker::Exit);
    }
}
