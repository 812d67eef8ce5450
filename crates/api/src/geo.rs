//! Geo-source fetching and the process-wide tree cache.
//!
//! The four datasets are fetched once, joined into a [`GeoTree`], and kept
//! for the life of the process. A failed fetch degrades to an empty tree:
//! every selector then offers only the placeholder and the free-text entry,
//! and the form stays usable.

use std::sync::Arc;
use std::time::Duration;

use fiber_survey_core::geo::{extract_records, GeoRecord, GeoSources, GeoTree};
use tokio::sync::OnceCell;

use crate::config::GeoSourceConfig;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum GeoFetchError {
    /// The underlying HTTP request failed (network, DNS, timeout, bad JSON).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Geo source {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },
}

// ---------------------------------------------------------------------------
// GeoFetcher
// ---------------------------------------------------------------------------

pub struct GeoFetcher {
    client: reqwest::Client,
    sources: GeoSourceConfig,
}

impl GeoFetcher {
    pub fn new(sources: GeoSourceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(sources.timeout_secs))
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, sources }
    }

    /// Fetch all four datasets, one after another. Any failure aborts the
    /// whole fetch.
    pub async fn fetch_sources(&self) -> Result<GeoSources, GeoFetchError> {
        Ok(GeoSources {
            divisions: self.fetch_records(&self.sources.divisions_url).await?,
            districts: self.fetch_records(&self.sources.districts_url).await?,
            upazilas: self.fetch_records(&self.sources.upazilas_url).await?,
            unions: self.fetch_records(&self.sources.unions_url).await?,
        })
    }

    /// Fetch and build the tree, collapsing any failure to an empty tree.
    pub async fn load_tree(&self) -> GeoTree {
        match self.fetch_sources().await {
            Ok(sources) => {
                let tree = GeoTree::build(&sources);
                tracing::info!(
                    divisions = sources.divisions.len(),
                    districts = sources.districts.len(),
                    upazilas = sources.upazilas.len(),
                    unions = sources.unions.len(),
                    "Geo tree built"
                );
                tree
            }
            Err(e) => {
                tracing::warn!(error = %e, "Geo sources unavailable, using empty tree");
                GeoTree::default()
            }
        }
    }

    async fn fetch_records(&self, url: &str) -> Result<Vec<GeoRecord>, GeoFetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeoFetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let doc: serde_json::Value = response.json().await?;
        let records = extract_records(&doc);
        tracing::debug!(url, records = records.len(), "Geo source fetched");
        Ok(records)
    }
}

// ---------------------------------------------------------------------------
// GeoTreeCache
// ---------------------------------------------------------------------------

/// Build-once holder for the geo tree.
///
/// Concurrent first callers wait on the same fetch; the result, empty or
/// not, is never refreshed.
pub struct GeoTreeCache {
    cell: OnceCell<Arc<GeoTree>>,
    fetcher: Option<GeoFetcher>,
}

impl GeoTreeCache {
    /// Lazily fetch from `fetcher` on first access.
    pub fn new(fetcher: GeoFetcher) -> Self {
        Self {
            cell: OnceCell::new(),
            fetcher: Some(fetcher),
        }
    }

    /// A cache that already holds `tree` and never touches the network.
    pub fn seeded(tree: GeoTree) -> Self {
        Self {
            cell: OnceCell::from(Arc::new(tree)),
            fetcher: None,
        }
    }

    pub async fn tree(&self) -> Arc<GeoTree> {
        self.cell
            .get_or_init(|| async {
                let tree = match &self.fetcher {
                    Some(fetcher) => fetcher.load_tree().await,
                    None => GeoTree::default(),
                };
                Arc::new(tree)
            })
            .await
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}
