use crate::domain::contact::ContactLogEntry;
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

const LOG_FILE_NAME: &str = "contacts.json";

/// File-backed append-only contact log: a single JSON array of entries.
///
/// Reads mask corruption — a missing or unparseable file is treated as an
/// empty log. Writes rewrite the whole array and are serialized behind a
/// mutex so concurrent appends cannot lose entries.
#[derive(Debug)]
pub struct ContactLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ContactLog {
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self { path: data_dir.join(LOG_FILE_NAME), write_lock: Mutex::new(()) }
    }

    /// Appends one entry, creating the data directory and log file on first use.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the log cannot
    /// be rewritten. Read and parse failures are masked as an empty log.
    pub async fn append(&self, entry: ContactLogEntry) -> io::Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_entries().await;
        entries.push(entry);

        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        let json = serde_json::to_vec_pretty(&entries).map_err(io::Error::other)?;
        tokio::fs::write(&self.path, json).await
    }

    /// All entries currently in the log; empty if the file is missing or corrupt.
    pub async fn read_entries(&self) -> Vec<ContactLogEntry> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }
}
