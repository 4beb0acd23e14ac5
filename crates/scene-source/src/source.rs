//! Scene data source - main entry point
//!
//! Owns one [`EntityStore`] for its whole life and keeps it, the derived
//! clock and the display name in step with every ingested document:
//! - `process` / `process_url` merge a document into the store
//! - `load` / `load_url` clear the store first
//!
//! Every mutating operation takes `&mut self`, so two ingestions can never
//! run against the same instance at once.

use crate::clock::derive_clock;
use crate::config::SourceConfig;
use crate::error::{SourceError, SourceResult};
use crate::events::{ListenerId, Listeners};
use crate::fetch::{DefaultFetcher, DocumentFetcher};
use scene_entity::{DocumentProcessor, EntityStore, PacketProcessor};
use scene_time::SimulationClock;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Callback raised after a successful ingestion
pub type ChangedListener = dyn Fn(&SceneDataSource) + Send + Sync;

/// Callback raised when fetching a document fails
pub type ErrorListener = dyn Fn(&SceneDataSource, &SourceError) + Send + Sync;

/// Observable, queryable source of time-dynamic entities
pub struct SceneDataSource {
    name: Option<String>,
    entities: EntityStore,
    clock: Option<SimulationClock>,
    is_time_varying: bool,
    changed: Listeners<ChangedListener>,
    error: Listeners<ErrorListener>,
    processor: Arc<dyn DocumentProcessor>,
    fetcher: Arc<dyn DocumentFetcher>,
    config: SourceConfig,
}

impl SceneDataSource {
    /// Create unnamed source with default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SourceConfig::default())
    }

    /// Create unnamed source with specific configuration
    ///
    /// Uses the packet processor and a default fetcher honoring
    /// `config.max_document_bytes`.
    #[must_use]
    pub fn with_config(config: SourceConfig) -> Self {
        Self {
            name: None,
            entities: EntityStore::new(),
            clock: None,
            is_time_varying: true,
            changed: Listeners::new(),
            error: Listeners::new(),
            processor: Arc::new(PacketProcessor::new()),
            fetcher: Arc::new(DefaultFetcher::new(config.max_document_bytes)),
            config,
        }
    }

    /// With display name; a name set here is never replaced by ingestion
    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// With custom document processor
    #[inline]
    #[must_use]
    pub fn with_processor(mut self, processor: impl DocumentProcessor) -> Self {
        self.processor = Arc::new(processor);
        self
    }

    /// With custom fetcher
    #[inline]
    #[must_use]
    pub fn with_fetcher(mut self, fetcher: impl DocumentFetcher) -> Self {
        self.fetcher = Arc::new(fetcher);
        self
    }

    /// Display name, if set or derived yet
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Clock derived by the latest ingestion
    #[inline]
    #[must_use]
    pub fn clock(&self) -> Option<&SimulationClock> {
        self.clock.as_ref()
    }

    /// Entity collection
    #[inline]
    #[must_use]
    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    /// Whether the data changes over simulation time
    ///
    /// Always `true`; it is not recomputed from the ingested data.
    #[inline]
    #[must_use]
    pub fn is_time_varying(&self) -> bool {
        self.is_time_varying
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Subscribe to successful ingestions
    pub fn on_changed(
        &self,
        listener: impl Fn(&SceneDataSource) + Send + Sync + 'static,
    ) -> ListenerId {
        self.changed.add(Arc::new(listener))
    }

    /// Unsubscribe a changed listener; returns false if it was not registered
    pub fn remove_changed_listener(&self, id: ListenerId) -> bool {
        self.changed.remove(id)
    }

    /// Subscribe to fetch failures
    pub fn on_error(
        &self,
        listener: impl Fn(&SceneDataSource, &SourceError) + Send + Sync + 'static,
    ) -> ListenerId {
        self.error.add(Arc::new(listener))
    }

    /// Unsubscribe an error listener; returns false if it was not registered
    pub fn remove_error_listener(&self, id: ListenerId) -> bool {
        self.error.remove(id)
    }

    /// Merge `document` into the entity store and re-derive the clock
    ///
    /// `source` identifies where the document came from; the first one seen
    /// names an unnamed data source.
    ///
    /// # Errors
    /// - `SourceError::InvalidArgument` if `document` is `null` (store untouched)
    /// - `SourceError::Process` if the processor rejects the document; the
    ///   store keeps whatever the processor applied before failing
    pub fn process(&mut self, document: &Value, source: Option<&str>) -> SourceResult<()> {
        if document.is_null() {
            return Err(SourceError::InvalidArgument("document"));
        }
        self.ingest(document, source)
    }

    /// Clear the entity store, then ingest `document` as [`process`](Self::process) does
    ///
    /// # Errors
    /// Same as [`process`](Self::process); a `null` document leaves the store
    /// uncleared.
    pub fn load(&mut self, document: &Value, source: Option<&str>) -> SourceResult<()> {
        if document.is_null() {
            return Err(SourceError::InvalidArgument("document"));
        }
        self.entities.clear();
        self.ingest(document, source)
    }

    /// Fetch `url` and merge the result via [`process`](Self::process)
    ///
    /// # Errors
    /// - `SourceError::InvalidArgument` if `url` is empty, before any fetch
    /// - `SourceError::Fetch` if fetching fails; the error channel is raised
    ///   first with the same error
    /// - `SourceError::Process` as for [`process`](Self::process)
    pub async fn process_url(&mut self, url: &str) -> SourceResult<()> {
        let document = self.fetch(url).await?;
        self.process(&document, Some(url))
    }

    /// Fetch `url` and replace the store's contents via [`load`](Self::load)
    ///
    /// # Errors
    /// Same as [`process_url`](Self::process_url); the store is only cleared
    /// once the fetch has succeeded.
    pub async fn load_url(&mut self, url: &str) -> SourceResult<()> {
        let document = self.fetch(url).await?;
        self.load(&document, Some(url))
    }

    async fn fetch(&self, url: &str) -> SourceResult<Value> {
        if url.trim().is_empty() {
            return Err(SourceError::InvalidArgument("url"));
        }

        tracing::debug!(url, "fetching document");
        match self.fetcher.fetch(url).await {
            Ok(document) => Ok(document),
            Err(e) => {
                let err = SourceError::Fetch(e);
                tracing::warn!(url, error = %err, "document fetch failed");
                self.raise_error(&err);
                Err(err)
            }
        }
    }

    fn ingest(&mut self, document: &Value, source: Option<&str>) -> SourceResult<()> {
        let header = self
            .processor
            .process(document, &mut self.entities, source)?;

        if let Some(declared) = &header.name {
            // Document-declared names are reserved; naming comes from the source.
            tracing::debug!(%declared, "ignoring document-declared name");
        }

        self.clock = derive_clock(&self.entities, header.clock.as_ref(), &self.config);

        if self.name.is_none() {
            self.name = source.and_then(name_from_source);
        }

        tracing::info!(
            name = self.name.as_deref().unwrap_or("<unnamed>"),
            entities = self.entities.len(),
            has_clock = self.clock.is_some(),
            "ingested document"
        );
        self.raise_changed();
        Ok(())
    }

    fn raise_changed(&self) {
        for listener in self.changed.snapshot() {
            listener(self);
        }
    }

    fn raise_error(&self, err: &SourceError) {
        for listener in self.error.snapshot() {
            listener(self, err);
        }
    }
}

impl Default for SceneDataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SceneDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneDataSource")
            .field("name", &self.name)
            .field("entities", &self.entities.len())
            .field("clock", &self.clock)
            .field("is_time_varying", &self.is_time_varying)
            .field("changed", &self.changed)
            .field("error", &self.error)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Trailing path segment of `source`, ignoring any query or fragment
fn name_from_source(source: &str) -> Option<String> {
    let path = source
        .split(|c: char| c == '?' || c == '#')
        .next()
        .unwrap_or(source);
    let name = path
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(path);
    (!name.is_empty()).then(|| name.to_string())
}
