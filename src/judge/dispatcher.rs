//! Submission dispatcher
//!
//! Decouples the API layer from evaluation: a handler enqueues a submission
//! id and returns immediately while a fixed pool of worker tasks drains the
//! queue and drives the [`Judge`](super::Judge). The queue is bounded, so a
//! flood of submissions backs up at the enqueue side instead of spawning
//! unbounded work.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::anyhow;
use tokio::sync::{Mutex, mpsc};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

use super::Judge;

/// Fire-and-forget entry point into the evaluation pipeline
///
/// Cheap to clone; all clones feed the same worker pool.
#[derive(Clone)]
pub struct Dispatcher {
    sender: mpsc::Sender<Uuid>,
    in_flight: Arc<AtomicUsize>,
}

impl Dispatcher {
    /// Start `workers` evaluation workers over a queue of `queue_capacity`
    pub fn new(judge: Arc<Judge>, workers: usize, queue_capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel::<Uuid>(queue_capacity);
        let receiver = Arc::new(Mutex::new(receiver));
        let in_flight = Arc::new(AtomicUsize::new(0));

        for worker_id in 0..workers {
            let judge = judge.clone();
            let receiver = receiver.clone();
            let in_flight = in_flight.clone();
            tokio::spawn(async move {
                worker_loop(worker_id, judge, receiver, in_flight).await;
            });
        }

        Self { sender, in_flight }
    }

    /// Queue one submission for evaluation
    ///
    /// Returns as soon as the id is enqueued. A full queue is reported to
    /// the caller instead of blocking the request that triggered it.
    pub fn dispatch(&self, submission_id: Uuid) -> AppResult<()> {
        match self.sender.try_send(submission_id) {
            Ok(()) => {
                self.in_flight.fetch_add(1, Ordering::SeqCst);
                tracing::debug!("Dispatched submission {} for evaluation", submission_id);
                Ok(())
            }
            Err(mpsc::error::TrySendError::Full(_)) => Err(AppError::Unavailable(
                "evaluation queue is full".to_string(),
            )),
            Err(mpsc::error::TrySendError::Closed(_)) => {
                Err(AppError::Internal(anyhow!("evaluation workers are gone")))
            }
        }
    }

    /// Submissions queued or currently being evaluated
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Drain the queue until every sender is gone
///
/// Workers share one receiver behind a mutex; the lock is held only while
/// waiting for the next id, never across an evaluation.
async fn worker_loop(
    worker_id: usize,
    judge: Arc<Judge>,
    receiver: Arc<Mutex<mpsc::Receiver<Uuid>>>,
    in_flight: Arc<AtomicUsize>,
) {
    tracing::info!("Judge worker {} started", worker_id);

    loop {
        let submission_id = {
            let mut receiver = receiver.lock().await;
            receiver.recv().await
        };
        let Some(submission_id) = submission_id else {
            break;
        };

        tracing::debug!("Worker {} picked up submission {}", worker_id, submission_id);
        if let Err(e) = judge.evaluate(submission_id).await {
            tracing::error!("Failed to evaluate submission {}: {}", submission_id, e);
        }
        in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    tracing::info!("Judge worker {} stopped", worker_id);
}
