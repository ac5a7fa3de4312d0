use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use anyhow::Result;
use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, error, warn};

pub struct Pool {
    workers:  usize,
    shutdown: Arc<AtomicBool>,
}

type Task<T> = (usize, PathBuf, Result<T>);

impl Pool {
    pub fn new(workers: Option<usize>, shutdown: Arc<AtomicBool>) -> Self {
        let workers = workers.unwrap_or_else(num_cpus::get).max(1);
        Self { workers, shutdown }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    // Runs the job once per path across the worker threads. Results come
    // back in input order; paths not started before shutdown are dropped.
    pub fn map<T, F>(&self, paths: Vec<PathBuf>, job: F) -> Vec<(PathBuf, Result<T>)>
    where
        T: Send + 'static,
        F: Fn(&Path) -> Result<T> + Send + Sync + 'static,
    {
        let count = paths.len();
        if count == 0 {
            return Vec::new();
        }

        let (tx, rx)   = bounded(count);
        let (dtx, drx) = bounded(count);

        for task in paths.into_iter().enumerate() {
            if tx.send(task).is_err() {
                break;
            }
        }
        drop(tx);

        let job     = Arc::new(job);
        let workers = self.workers.min(count);

        debug!("dispatching {} tasks to {} workers", count, workers);

        let handles = (0..workers).map(|id| {
            let rx       = rx.clone();
            let tx       = dtx.clone();
            let job      = job.clone();
            let shutdown = self.shutdown.clone();
            thread::spawn(move || work(id, rx, tx, job, shutdown))
        }).collect::<Vec<_>>();

        drop(dtx);

        let mut done = drx.iter().collect::<Vec<Task<T>>>();

        for handle in handles {
            if handle.join().is_err() {
                error!("worker panicked");
            }
        }

        done.sort_by_key(|(index, ..)| *index);
        done.into_iter().map(|(_, path, result)| (path, result)).collect()
    }
}

fn work<T, F>(
    id:       usize,
    rx:       Receiver<(usize, PathBuf)>,
    tx:       Sender<Task<T>>,
    job:      Arc<F>,
    shutdown: Arc<AtomicBool>,
) where
    F: Fn(&Path) -> Result<T>,
{
    for (index, path) in rx.iter() {
        if shutdown.load(Ordering::Acquire) {
            debug!("worker {} stopping", id);
            break;
        }

        let result = (*job)(&path);

        if let Err(e) = &result {
            warn!("{} failed: {:#}", path.display(), e);
        }

        if tx.send((index, path, result)).is_err() {
            break;
        }
    }
}
