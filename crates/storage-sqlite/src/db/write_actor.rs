//! Single-writer actor for the artifact tables.
//!
//! Artifact overwrites are funneled through one dedicated connection so a
//! stage's delete-and-insert is never interleaved with another writer. Each
//! job runs inside an immediate transaction; on failure the transaction
//! rolls back and the previous artifact contents stay visible to readers.

use diesel::SqliteConnection;
use log::error;
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::StorageError;
use adspend_core::errors::{DatabaseError, Error, Result};

/// An artifact write job. Runs against the writer's connection and reports
/// the number of rows written.
type WriteJob = Box<dyn FnOnce(&mut SqliteConnection) -> Result<usize> + Send + 'static>;

/// Handle for sending write jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(WriteJob, oneshot::Sender<Result<usize>>)>,
}

impl WriteHandle {
    /// Executes `job` on the writer connection inside an immediate
    /// transaction and returns its rows-written count.
    pub async fn exec<F>(&self, job: F) -> Result<usize>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<usize> + Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.tx.send((Box::new(job), reply_tx)).await.map_err(|_| {
            Error::Database(DatabaseError::TransactionFailed(
                "database writer is no longer running".to_string(),
            ))
        })?;

        reply_rx.await.map_err(|_| {
            Error::Database(DatabaseError::TransactionFailed(
                "database writer dropped the reply".to_string(),
            ))
        })?
    }
}

/// Spawns the writer task. It holds one pooled connection for its lifetime
/// and processes write jobs strictly in arrival order.
pub fn spawn_writer(pool: DbPool) -> Result<WriteHandle> {
    let (tx, mut rx) = mpsc::channel::<(WriteJob, oneshot::Sender<Result<usize>>)>(64);
    let mut conn = super::get_connection(&pool)?;

    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            let result = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);

            if reply_tx.send(result).is_err() {
                error!("Writer reply receiver dropped before the result was delivered");
            }
        }
        // rx.recv() returned None: every WriteHandle is gone, the actor
        // can terminate.
    });

    Ok(WriteHandle { tx })
}
