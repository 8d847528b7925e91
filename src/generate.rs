//! Concurrent fingerprint generation across input files.
//!
//! One task per input file runs on a bounded worker pool; each task calls the
//! external fingerprinting collaborator and sends its sub-result back over a
//! channel. Only the orchestrating thread writes into the store, merging
//! completed sub-results in file order so the store's entry order is
//! reproducible run to run. Collection is bounded by a deadline: on expiry
//! the partial results are discarded and the whole phase fails.

use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::errors::{CrosscheckError, Result};
use crate::fingerprint::{Evidence, Fingerprint, FingerprintId, FingerprintStore};

/// Produces per-read-group fingerprints from one sequencing file.
///
/// Implemented by the external genotype-likelihood collaborator. A file may
/// contain multiple read groups; one fingerprint is returned per read group,
/// keyed by its identity.
pub trait Fingerprinter<E>: Send + Sync {
    /// Fingerprints every read group in the file at `path`.
    fn fingerprint_file(&self, path: &Path) -> anyhow::Result<Vec<(FingerprintId, Fingerprint<E>)>>;
}

type FileResult<E> = (usize, anyhow::Result<Vec<(FingerprintId, Fingerprint<E>)>>);

/// Fingerprints `files` concurrently and merges the results into one store.
///
/// At most `threads` workers run at a time. The whole phase must finish
/// within `timeout`; on expiry outstanding work is cancelled and a timeout
/// error is returned instead of a partial store, because a partial crosscheck
/// matrix is misleading. Any task failure likewise aborts the phase. A
/// duplicate identity key across results is an identity-collision error.
pub fn generate_fingerprints<E, F>(
    fingerprinter: Arc<F>,
    files: &[PathBuf],
    threads: usize,
    timeout: Duration,
) -> Result<FingerprintStore<E>>
where
    E: Evidence + Send + 'static,
    F: Fingerprinter<E> + ?Sized + 'static,
{
    if threads == 0 {
        return Err(CrosscheckError::InvalidParameter {
            parameter: "threads".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let mut store = FingerprintStore::new();
    if files.is_empty() {
        return Ok(store);
    }

    let deadline = Instant::now() + timeout;
    let worker_count = threads.min(files.len());

    let (job_tx, job_rx) = unbounded::<(usize, PathBuf)>();
    let (result_tx, result_rx) = bounded::<FileResult<E>>(files.len());

    for (index, file) in files.iter().enumerate() {
        // the receiver is alive, so this cannot fail
        let _ = job_tx.send((index, file.clone()));
    }
    drop(job_tx);

    for _ in 0..worker_count {
        let jobs = job_rx.clone();
        let results = result_tx.clone();
        let fingerprinter = Arc::clone(&fingerprinter);
        thread::spawn(move || {
            while let Ok((index, path)) = jobs.recv() {
                let outcome = fingerprinter.fingerprint_file(&path);
                if results.send((index, outcome)).is_err() {
                    // the orchestrator gave up; stop taking work
                    break;
                }
            }
        });
    }
    drop(result_tx);

    let collected = collect_within_deadline(&result_rx, files, deadline, timeout);
    if collected.is_err() {
        // Cancel queued work so the detached workers wind down quickly.
        while job_rx.try_recv().is_ok() {}
    }
    drop(job_rx);

    for fingerprints in collected?.into_iter().flatten() {
        for (id, fingerprint) in fingerprints {
            store.insert(id, fingerprint)?;
        }
    }

    info!("Generated {} fingerprints from {} files", store.len(), files.len());
    Ok(store)
}

/// Waits for one sub-result per file, keeping them in file order. Fails on
/// the first task error, on deadline expiry, and when every worker is gone.
fn collect_within_deadline<E>(
    results: &Receiver<FileResult<E>>,
    files: &[PathBuf],
    deadline: Instant,
    timeout: Duration,
) -> Result<Vec<Option<Vec<(FingerprintId, Fingerprint<E>)>>>> {
    let mut collected: Vec<Option<Vec<(FingerprintId, Fingerprint<E>)>>> =
        (0..files.len()).map(|_| None).collect();

    for _ in 0..files.len() {
        match results.recv_deadline(deadline) {
            Ok((index, Ok(fingerprints))) => {
                debug!("Fingerprinted '{}'", files[index].display());
                collected[index] = Some(fingerprints);
            }
            Ok((index, Err(e))) => {
                return Err(CrosscheckError::FingerprintingFailed {
                    path: files[index].display().to_string(),
                    message: format!("{e:#}"),
                });
            }
            Err(RecvTimeoutError::Timeout) => {
                return Err(CrosscheckError::GenerationTimeout { timeout });
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(CrosscheckError::WorkerPoolStopped);
            }
        }
    }

    Ok(collected)
}
