//! Append-only signal history, one JSON record per line.

use crate::models::SignalRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum SignalLogError {
    #[error("signal log I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode signal record: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("signal log line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub struct SignalLog {
    path: PathBuf,
    // Serialises appends from concurrent symbol tasks.
    write_lock: Mutex<()>,
}

impl SignalLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn append(&self, record: &SignalRecord) -> Result<(), SignalLogError> {
        let mut line = serde_json::to_string(record).map_err(SignalLogError::Serialize)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Every record in the log, oldest first. A missing file is an empty log.
    pub async fn read_all(&self) -> Result<Vec<SignalRecord>, SignalLogError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        contents
            .lines()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty())
            .map(|(i, l)| {
                serde_json::from_str(l).map_err(|source| SignalLogError::Json {
                    line: i + 1,
                    source,
                })
            })
            .collect()
    }
}
