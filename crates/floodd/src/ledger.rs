//! Ledger store - every reported request, plus its CSV export.
//!
//! The ledger is a pretty-printed JSON array rewritten in full on each
//! append. Callers serialize access (see `service::DispatchService`).

use flood_common::{EmergencyRequest, FloodError, DAILY_LOG_HEADER};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

pub struct LedgerStore {
    ledger_path: PathBuf,
    export_path: PathBuf,
}

impl LedgerStore {
    /// Open the store, creating the directory and seeding missing files
    pub async fn open(
        dir: impl AsRef<Path>,
        ledger_file: &str,
        export_file: &str,
    ) -> Result<Self, FloodError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).await?;

        let store = Self {
            ledger_path: dir.join(ledger_file),
            export_path: dir.join(export_file),
        };

        if fs::try_exists(&store.ledger_path).await? {
            info!("{} already exists", store.ledger_path.display());
        } else {
            fs::write(&store.ledger_path, "[]").await?;
            info!("{} created and initialized", store.ledger_path.display());
        }

        if fs::try_exists(&store.export_path).await? {
            info!("{} already exists", store.export_path.display());
        } else {
            fs::write(&store.export_path, format!("{}\n", DAILY_LOG_HEADER)).await?;
            info!("{} created and initialized", store.export_path.display());
        }

        Ok(store)
    }

    pub async fn read_all(&self) -> Result<Vec<EmergencyRequest>, FloodError> {
        let content = fs::read_to_string(&self.ledger_path).await?;
        let entries: Vec<EmergencyRequest> = serde_json::from_str(&content)?;
        Ok(entries)
    }

    /// Read the whole ledger, append one entry, write it back
    pub async fn append(&self, request: &EmergencyRequest) -> Result<(), FloodError> {
        let mut entries = self.read_all().await?;
        entries.push(request.clone());
        let content = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.ledger_path, content).await?;
        Ok(())
    }

    /// Overwrite the export file
    pub async fn write_export(&self, contents: &str) -> Result<(), FloodError> {
        fs::write(&self.export_path, contents).await?;
        Ok(())
    }

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    pub fn export_path(&self) -> &Path {
        &self.export_path
    }

    /// File name of the export, as reported to API clients
    pub fn export_file_name(&self) -> String {
        self.export_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
