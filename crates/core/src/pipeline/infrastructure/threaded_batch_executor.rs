use std::path::PathBuf;
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};

use crate::alignment::domain::geometric_aligner::GeometricAligner;
use crate::pipeline::batch_executor::{align_record_file, BatchConfig, BatchExecutor, BatchItem};

const DEFAULT_CHANNEL_CAPACITY: usize = 8;

type Job = (usize, PathBuf);

/// Aligns detection files on a pool of worker threads.
///
/// Layout: `feeder → workers[n] → main [reorder]`
///
/// Jobs carry their input index so the main thread can restore input order
/// after workers finish out of order.
pub struct ThreadedBatchExecutor {
    workers: usize,
    channel_capacity: usize,
}

impl ThreadedBatchExecutor {
    pub fn new() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::with_workers(workers)
    }

    /// Zero is treated as one worker.
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Default for ThreadedBatchExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchExecutor for ThreadedBatchExecutor {
    fn execute(
        &self,
        paths: &[PathBuf],
        aligner: &GeometricAligner,
        config: BatchConfig,
    ) -> Result<Vec<BatchItem>, Box<dyn std::error::Error>> {
        let cap = self.channel_capacity;
        let (job_tx, job_rx) = crossbeam_channel::bounded::<Job>(cap);
        let (item_tx, item_rx) = crossbeam_channel::bounded::<(usize, BatchItem)>(cap);

        let feeder_handle = spawn_feeder(paths.to_vec(), job_tx);
        let worker_handles: Vec<_> = (0..self.workers.min(paths.len().max(1)))
            .map(|_| spawn_worker(aligner.clone(), config, job_rx.clone(), item_tx.clone()))
            .collect();
        drop(job_rx);
        drop(item_tx);

        let mut slots: Vec<Option<BatchItem>> = (0..paths.len()).map(|_| None).collect();
        for (index, item) in item_rx {
            slots[index] = Some(item);
        }

        join_threads(feeder_handle, worker_handles)?;

        let items: Vec<BatchItem> = slots.into_iter().flatten().collect();
        if items.len() != paths.len() {
            return Err(format!(
                "Batch finished with {} of {} items",
                items.len(),
                paths.len()
            )
            .into());
        }
        log::debug!("Aligned {} files on {} workers", items.len(), self.workers);
        Ok(items)
    }
}

fn spawn_feeder(paths: Vec<PathBuf>, job_tx: Sender<Job>) -> JoinHandle<()> {
    std::thread::spawn(move || {
        for job in paths.into_iter().enumerate() {
            if job_tx.send(job).is_err() {
                break;
            }
        }
    })
}

fn spawn_worker(
    aligner: GeometricAligner,
    config: BatchConfig,
    job_rx: Receiver<Job>,
    item_tx: Sender<(usize, BatchItem)>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        for (index, path) in job_rx {
            let item = align_record_file(&path, &aligner, config);
            if let Err(e) = &item.faces {
                log::warn!("{e}");
            }
            if item_tx.send((index, item)).is_err() {
                break;
            }
        }
    })
}

/// Joins the feeder and every worker, reporting the first panic.
fn join_threads(
    feeder_handle: JoinHandle<()>,
    worker_handles: Vec<JoinHandle<()>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut first_error: Option<Box<dyn std::error::Error>> = None;

    if feeder_handle.join().is_err() {
        first_error = Some("Feeder thread panicked".into());
    }
    for handle in worker_handles {
        if handle.join().is_err() && first_error.is_none() {
            first_error = Some("Worker thread panicked".into());
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
