use std::path::PathBuf;

const PROBE_FILE_NAME: &str = ".readyz-probe";

#[derive(Clone, Debug)]
pub struct HealthService {
    data_dir: PathBuf,
}

impl HealthService {
    #[must_use]
    pub const fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Checks that the contact-log directory exists and is writable by
    /// creating and removing a probe file.
    ///
    /// # Errors
    /// Returns a string describing the failure if the directory is unusable.
    pub async fn check_storage(&self) -> Result<(), String> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| format!("Data directory {} is unavailable: {e}", self.data_dir.display()))?;

        let probe = self.data_dir.join(PROBE_FILE_NAME);
        tokio::fs::write(&probe, b"ok")
            .await
            .map_err(|e| format!("Data directory {} is not writable: {e}", self.data_dir.display()))?;
        let _ = tokio::fs::remove_file(&probe).await;

        Ok(())
    }
}
