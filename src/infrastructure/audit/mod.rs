//! Best-effort audit trail of link creations and redirects.
//!
//! Lines are handed to a bounded channel and appended to a text file by a
//! background writer. The request path never waits on the file: a full queue,
//! a closed writer, or an I/O error drops the line and nothing else.
//!
//! # Flow
//!
//! 1. A service calls [`AuditLog::record`] (non-blocking `try_send`)
//! 2. [`run_audit_writer`] receives the line
//! 3. The line is appended as `[<RFC 3339 timestamp>] <line>`

use chrono::{SecondsFormat, Utc};
use std::path::PathBuf;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Cloneable handle for submitting audit lines.
#[derive(Clone, Debug, Default)]
pub struct AuditLog {
    sender: Option<mpsc::Sender<String>>,
}

impl AuditLog {
    /// Starts the background writer for `path` and returns a handle to it.
    ///
    /// The writer task ends once every handle has been dropped and the queue
    /// is drained.
    pub fn spawn(path: PathBuf, capacity: usize) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity);
        let handle = tokio::spawn(run_audit_writer(rx, path));

        (Self { sender: Some(tx) }, handle)
    }

    /// A handle that discards every line.
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Returns true if the writer task has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.as_ref().is_some_and(|tx| tx.is_closed())
    }

    /// Queues a line for the audit file. Never blocks and never fails.
    pub fn record(&self, line: impl Into<String>) {
        let Some(tx) = &self.sender else {
            return;
        };

        if let Err(e) = tx.try_send(line.into()) {
            debug!("Audit line dropped: {}", e);
        }
    }
}

/// Appends queued lines to the audit file until the channel closes.
///
/// The file is opened lazily and reopened after a write error.
pub async fn run_audit_writer(mut rx: mpsc::Receiver<String>, path: PathBuf) {
    let mut file: Option<File> = None;

    while let Some(line) = rx.recv().await {
        let entry = format!(
            "[{}] {}\n",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            line
        );

        if file.is_none() {
            match OpenOptions::new().create(true).append(true).open(&path).await {
                Ok(f) => file = Some(f),
                Err(e) => {
                    debug!("Failed to open audit log {}: {}", path.display(), e);
                    continue;
                }
            }
        }

        if let Some(f) = file.as_mut()
            && let Err(e) = f.write_all(entry.as_bytes()).await
        {
            debug!("Failed to write audit log {}: {}", path.display(), e);
            file = None;
        }
    }

    if let Some(mut f) = file {
        let _ = f.flush().await;
    }
}
