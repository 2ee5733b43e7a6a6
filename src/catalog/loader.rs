//! Catalog sources and the one-shot background loader.
//!
//! A view asks for the catalog exactly once when it is mounted. The fetch runs
//! as a tokio task whose handle the view owns; dropping the handle aborts the
//! task so a torn-down view never receives a late result.

use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::{CatalogError, CatalogResult, Product};
use crate::config::Config;
use crate::version;

/// Somewhere a product collection can be read from
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Read the whole collection
    async fn fetch(&self) -> CatalogResult<Vec<Product>>;

    /// Human readable origin, used in logs and the status bar
    fn describe(&self) -> String;
}

/// Catalog served as a JSON array over HTTP
pub struct HttpCatalogSource {
    client: Client,
    endpoint: String,
}

impl HttpCatalogSource {
    pub fn new(endpoint: impl Into<String>) -> CatalogResult<Self> {
        let client = Client::builder()
            .user_agent(format!("{}/{}", version::APP_NAME, version::VERSION))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> CatalogResult<Vec<Product>> {
        debug!("GET {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::StatusError(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

/// Catalog stored as a JSON array in a local file
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> CatalogResult<Vec<Product>> {
        let content = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&content)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Pick the source the configuration points at: a local file when one is
/// set, the HTTP endpoint otherwise.
pub fn source_for(config: &Config) -> CatalogResult<Arc<dyn CatalogSource>> {
    match &config.catalog_file {
        Some(path) => Ok(Arc::new(FileCatalogSource::new(path.clone()))),
        None => Ok(Arc::new(HttpCatalogSource::new(config.endpoint.clone())?)),
    }
}

/// Outcome of a catalog load, delivered to the view that asked for it
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogUpdate {
    Loaded(Vec<Product>),
    Failed(String),
}

/// Fetch once and log any failure. Failures yield `None` so the caller keeps
/// the collection it already has.
pub async fn fetch_logged(source: &dyn CatalogSource) -> Option<Vec<Product>> {
    match source.fetch().await {
        Ok(products) => {
            info!("Loaded {} products from {}", products.len(), source.describe());
            Some(products)
        }
        Err(e) => {
            error!("Error fetching products from {}: {}", source.describe(), e);
            None
        }
    }
}

/// Spawns the single catalog fetch for a view
pub struct CatalogLoader;

impl CatalogLoader {
    /// Start fetching in the background. The outcome is sent on `sender`; if
    /// the receiver is gone by then the outcome is dropped.
    pub fn spawn<E>(source: Arc<dyn CatalogSource>, sender: mpsc::UnboundedSender<E>) -> LoadHandle
    where
        E: From<CatalogUpdate> + Send + 'static,
    {
        let task = tokio::spawn(async move {
            let update = match fetch_logged(source.as_ref()).await {
                Some(products) => CatalogUpdate::Loaded(products),
                None => CatalogUpdate::Failed(format!("Could not load catalog from {}", source.describe())),
            };

            if sender.send(E::from(update)).is_err() {
                debug!("Catalog view is gone, discarding load result");
            }
        });

        LoadHandle { task }
    }
}

/// Owns the background fetch. Dropping it cancels the fetch.
#[derive(Debug)]
pub struct LoadHandle {
    task: JoinHandle<()>,
}

impl LoadHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
