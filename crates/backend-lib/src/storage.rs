// ============================
// crates/backend-lib/src/storage.rs
// ============================
//! Lead storage abstraction with flat-file implementation.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use suburbsight_common::LeadSubmission;
use tokio::{fs as tokio_fs, io::AsyncWriteExt};

use crate::error::AppError;

/// An accepted lead, as persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredLead {
    #[serde(flatten)]
    pub submission: LeadSubmission,
    /// Bucketing key the submission was admitted under
    pub client_id: String,
    pub received_at: DateTime<Utc>,
}

/// Trait for lead storage backends
#[async_trait]
pub trait LeadStorage: Send + Sync {
    /// Append one accepted lead
    async fn append_lead(&self, lead: &StoredLead) -> Result<(), AppError>;

    /// Read all stored leads, oldest first
    async fn read_leads(&self) -> Result<Vec<StoredLead>, AppError>;
}

/// Flat-file implementation: one JSON line per lead in `leads.log`.
#[derive(Clone)]
pub struct FlatFileStorage {
    root: PathBuf,
}

impl FlatFileStorage {
    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn log_path(&self) -> PathBuf {
        self.root.join("leads.log")
    }
}

#[async_trait]
impl LeadStorage for FlatFileStorage {
    async fn append_lead(&self, lead: &StoredLead) -> Result<(), AppError> {
        let line = serde_json::to_string(lead)?;

        let mut file = tokio_fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_path())
            .await?;

        file.write_all(line.as_bytes()).await?;
        file.write_all(b"\n").await?;
        Ok(())
    }

    async fn read_leads(&self) -> Result<Vec<StoredLead>, AppError> {
        let path = self.log_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = tokio_fs::read_to_string(&path).await?;
        let leads = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str)
            .collect::<Result<Vec<StoredLead>, _>>()?;

        Ok(leads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn lead(name: &str) -> StoredLead {
        StoredLead {
            submission: LeadSubmission {
                name: name.to_string(),
                email: "jo@example.com".to_string(),
                phone: None,
                suburb: Some("Brunswick".to_string()),
                message: "Send me the report".to_string(),
            },
            client_id: "1.2.3.4".to_string(),
            received_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn append_then_read_round_trips() {
        let dir = tempdir().unwrap();
        let storage = FlatFileStorage::new(dir.path()).unwrap();

        storage.append_lead(&lead("First")).await.unwrap();
        storage.append_lead(&lead("Second")).await.unwrap();

        let leads = storage.read_leads().await.unwrap();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].submission.name, "First");
        assert_eq!(leads[1].submission.name, "Second");
        assert_eq!(leads[0].client_id, "1.2.3.4");
    }

    #[tokio::test]
    async fn reading_with_no_log_file_is_empty() {
        let dir = tempdir().unwrap();
        let storage = FlatFileStorage::new(dir.path()).unwrap();
        assert!(storage.read_leads().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_line_surfaces_as_an_error() {
        let dir = tempdir().unwrap();
        let storage = FlatFileStorage::new(dir.path()).unwrap();
        storage.append_lead(&lead("Good")).await.unwrap();
        tokio_fs::write(storage.log_path(), "{not json}\n")
            .await
            .unwrap();

        assert!(matches!(
            storage.read_leads().await,
            Err(AppError::Json(_))
        ));
    }
}
