//! Persisted settings: the API configuration plus an optional prompt override.
//!
//! The data is one small JSON blob shaped like
//! `{ "config": { "apiEndpoint": .., "apiKey": .., "modelName": .., "defaultPrompt": .. }, "customPrompt": ".." }`.
//! [`ConfigStore`] is the seam the rest of the crate talks to; [`FileStore`]
//! keeps the blob on disk and [`MemoryStore`] keeps it in memory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::summarizer::{DEFAULT_MODEL, DEFAULT_PROMPT};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// API settings. Absent fields load as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    pub api_endpoint: String,
    pub api_key: String,
    pub model_name: String,
    pub default_prompt: String,
}

impl Configuration {
    /// Values written on first setup. The key is left for the user to fill in.
    pub fn with_install_defaults() -> Self {
        Self {
            api_endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            model_name: DEFAULT_MODEL.to_string(),
            default_prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    /// API key with everything but the first few characters hidden.
    pub fn masked_key(&self) -> String {
        if self.api_key.is_empty() {
            return String::new();
        }
        let visible: String = self.api_key.chars().take(4).collect();
        format!("{visible}****")
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct StorageBlob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    config: Option<Configuration>,
    #[serde(
        default,
        rename = "customPrompt",
        skip_serializing_if = "Option::is_none"
    )]
    custom_prompt: Option<String>,
}

#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get_config(&self) -> Result<Configuration, StoreError>;

    async fn save_config(&self, config: &Configuration) -> Result<(), StoreError>;

    /// The user's prompt override, if one is saved.
    async fn custom_prompt(&self) -> Result<Option<String>, StoreError>;

    async fn save_prompt(&self, prompt: &str) -> Result<(), StoreError>;

    async fn clear_prompt(&self) -> Result<(), StoreError>;

    /// Prompt to summarize with: the override when set, else the configured default.
    async fn get_prompt(&self) -> Result<String, StoreError> {
        match self.custom_prompt().await? {
            Some(prompt) if !prompt.is_empty() => Ok(prompt),
            _ => Ok(self.get_config().await?.default_prompt),
        }
    }
}

/// JSON file on disk. Missing files read as empty storage.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_blob(&self) -> Result<StorageBlob, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(StorageBlob::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StorageBlob::default()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    async fn write_blob(&self, blob: &StorageBlob) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_vec_pretty(blob)?;

        // Readers see either the old file or the new one, never a partial write
        let staging = self.staging_path();
        tokio::fs::write(&staging, json)
            .await
            .map_err(|e| self.io_error(e))?;
        if let Err(e) = tokio::fs::rename(&staging, &self.path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(self.io_error(e));
        }
        debug!(path = %self.path.display(), "Storage written");
        Ok(())
    }

    async fn update(&self, change: impl FnOnce(&mut StorageBlob)) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut blob = self.read_blob().await?;
        change(&mut blob);
        self.write_blob(&blob).await
    }
}

#[async_trait]
impl ConfigStore for FileStore {
    async fn get_config(&self) -> Result<Configuration, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_blob().await?.config.unwrap_or_default())
    }

    async fn save_config(&self, config: &Configuration) -> Result<(), StoreError> {
        let config = config.clone();
        self.update(move |blob| blob.config = Some(config)).await
    }

    async fn custom_prompt(&self) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_blob().await?.custom_prompt)
    }

    async fn save_prompt(&self, prompt: &str) -> Result<(), StoreError> {
        let prompt = prompt.to_string();
        self.update(move |blob| blob.custom_prompt = Some(prompt)).await
    }

    async fn clear_prompt(&self) -> Result<(), StoreError> {
        self.update(|blob| blob.custom_prompt = None).await
    }
}

#[derive(Default)]
pub struct MemoryStore {
    blob: Mutex<StorageBlob>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Configuration) -> Self {
        Self {
            blob: Mutex::new(StorageBlob {
                config: Some(config),
                custom_prompt: None,
            }),
        }
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn get_config(&self) -> Result<Configuration, StoreError> {
        Ok(self.blob.lock().await.config.clone().unwrap_or_default())
    }

    async fn save_config(&self, config: &Configuration) -> Result<(), StoreError> {
        self.blob.lock().await.config = Some(config.clone());
        Ok(())
    }

    async fn custom_prompt(&self) -> Result<Option<String>, StoreError> {
        Ok(self.blob.lock().await.custom_prompt.clone())
    }

    async fn save_prompt(&self, prompt: &str) -> Result<(), StoreError> {
        self.blob.lock().await.custom_prompt = Some(prompt.to_string());
        Ok(())
    }

    async fn clear_prompt(&self) -> Result<(), StoreError> {
        self.blob.lock().await.custom_prompt = None;
        Ok(())
    }
}
