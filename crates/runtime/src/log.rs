//! JSONL event log
//!
//! Records are handed to a background task over an unbounded channel and appended to
//! the log file one JSON object per line, so the session loop never waits on disk.

use anyhow::{Context, Result};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::protocol::EventRecord;

pub struct EventLog {
    tx: mpsc::UnboundedSender<EventRecord>,
    task: JoinHandle<()>,
}

impl EventLog {
    /// Open `path` for appending and start the writer task
    pub async fn open(path: &str) -> Result<Self> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("open event log {}", path))?;

        let (tx, mut rx) = mpsc::unbounded_channel::<EventRecord>();
        let task = tokio::spawn(async move {
            let mut buf: Vec<u8> = Vec::with_capacity(4096);
            while let Some(record) = rx.recv().await {
                buf.clear();
                if serde_json::to_writer(&mut buf, &record).is_err() {
                    continue;
                }
                buf.push(b'\n');
                if file.write_all(&buf).await.is_err() {
                    break;
                }
            }
            let _ = file.flush().await;
        });

        Ok(Self { tx, task })
    }

    pub fn record(&self, record: EventRecord) {
        let _ = self.tx.send(record);
    }

    /// Flush pending records and stop the writer
    pub async fn close(self) -> Result<()> {
        drop(self.tx);
        self.task.await.context("event log writer panicked")?;
        Ok(())
    }
}
