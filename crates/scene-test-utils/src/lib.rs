//! Testing utilities for the scene workspace
//!
//! Shared fixtures: document builders, an in-memory fetcher and tracing setup.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use scene_source::{DocumentFetcher, FetchError};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Once};

/// Install a test subscriber once; honors `RUST_LOG`
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn entity_packet(id: &str, availability: &str) -> Value {
    json!({"id": id, "availability": availability})
}

pub fn static_packet(id: &str) -> Value {
    json!({"id": id, "position": {"cartographicDegrees": [0.0, 0.0, 0.0]}})
}

pub fn document_packet_with_clock(clock: Value) -> Value {
    json!({"id": "document", "clock": clock})
}

pub fn scene(packets: impl IntoIterator<Item = Value>) -> Value {
    Value::Array(packets.into_iter().collect())
}

/// In-memory fetcher: serves registered documents, 404s everything else
#[derive(Debug, Default)]
pub struct StubFetcher {
    documents: HashMap<String, Value>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: impl Into<String>, document: Value) -> Self {
        self.documents.insert(url.into(), document);
        self
    }

    /// Shared log of requested URLs; stays readable after the fetcher is moved
    pub fn request_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.requests)
    }
}

#[async_trait]
impl DocumentFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        self.requests.lock().push(url.to_string());
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}
