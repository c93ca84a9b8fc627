use crate::core::{CountrySource, Storage, UpstreamCountry};
use crate::utils::error::{LookupError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
pub struct MockStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
        let files = self.files.lock().await;
        files.get(path).cloned()
    }

    pub async fn put_file(&self, path: &str, data: &[u8]) {
        let mut files = self.files.lock().await;
        files.insert(path.to_string(), data.to_vec());
    }

    pub async fn file_count(&self) -> usize {
        self.files.lock().await.len()
    }
}

impl Storage for MockStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let files = self.files.lock().await;
        files.get(path).cloned().ok_or_else(|| {
            LookupError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            ))
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut files = self.files.lock().await;
        files.insert(path.to_string(), data.to_vec());
        Ok(())
    }
}

/// Canned upstream answers, counting every fetch.
#[derive(Clone)]
pub struct MockSource {
    reply: Arc<dyn Fn(&str) -> Result<UpstreamCountry> + Send + Sync>,
    calls: Arc<AtomicUsize>,
}

impl MockSource {
    pub fn new<F>(reply: F) -> Self
    where
        F: Fn(&str) -> Result<UpstreamCountry> + Send + Sync + 'static,
    {
        Self {
            reply: Arc::new(reply),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Answers every code with the given JSON payload.
    pub fn json(payload: serde_json::Value) -> Self {
        Self::new(move |_| Ok(serde_json::from_value(payload.clone())?))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CountrySource for MockSource {
    async fn fetch(&self, country_code: &str) -> Result<UpstreamCountry> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.reply)(country_code)
    }
}
