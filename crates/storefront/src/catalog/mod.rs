//! Remote product catalog client.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest`: `GET /products` and `GET /products/{id}`
//! - The remote is the source of truth - no local sync, no cache
//! - Every record goes through [`convert_product`], which draws a fresh
//!   "previous price" from the client's [`DiscountSource`]
//!
//! # Example
//!
//! ```rust,ignore
//! use souk_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog);
//!
//! let products = client.list_products().await?;
//! let product = client.get_product(&ProductId::new("1")).await?;
//! ```

mod conversions;
mod discount;
pub mod types;

pub use conversions::convert_product;
pub use discount::{DiscountSource, SeededDiscount, ThreadRngDiscount};

use std::sync::Arc;

use souk_core::{Product, ProductId};
use thiserror::Error;
use tracing::{debug, error, instrument};
use url::Url;

use crate::config::CatalogConfig;
use types::RawProduct;

/// Longest response excerpt written to logs and errors.
const BODY_EXCERPT_CHARS: usize = 500;

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The body is not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured base URL cannot carry a path.
    #[error("Invalid catalog URL: {0}")]
    InvalidBaseUrl(String),
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the remote product catalog.
///
/// Cheaply cloneable; clones share the connection pool and discount source.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    discounts: Arc<dyn DiscountSource>,
}

impl CatalogClient {
    /// Create a client that draws previous prices from the thread RNG.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self::with_discounts(config, Arc::new(ThreadRngDiscount))
    }

    /// Create a client with an explicit discount source.
    #[must_use]
    pub fn with_discounts(config: &CatalogConfig, discounts: Arc<dyn DiscountSource>) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                discounts,
            }),
        }
    }

    /// `{base}/products`, plus `/{id}` when given.
    fn products_url(&self, id: Option<&ProductId>) -> Result<Url, CatalogError> {
        let mut url = self.inner.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| CatalogError::InvalidBaseUrl(self.inner.base_url.to_string()))?;
            segments.pop_if_empty().push("products");
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    /// GET `url` and return the body of a success response.
    async fn fetch(&self, url: Url) -> Result<String, CatalogError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                status = %status,
                body = %excerpt(&body),
                "Catalog returned non-success status"
            );
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: excerpt(&body),
            });
        }

        Ok(body)
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// List every product, in the order the catalog returns them.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the catalog answers with a
    /// non-success status, or the body is not a JSON array of products.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let body = self.fetch(self.products_url(None)?).await?;

        let raw: Vec<RawProduct> = serde_json::from_str(&body).inspect_err(|e| {
            error!(error = %e, body = %excerpt(&body), "Failed to parse product list");
        })?;

        debug!(count = raw.len(), "Fetched products");
        Ok(raw
            .into_iter()
            .map(|p| convert_product(p, self.inner.discounts.as_ref()))
            .collect())
    }

    /// Get one product.
    ///
    /// An empty or `null` body means the catalog has no such product and
    /// yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the catalog answers with a
    /// non-success status, or the body is neither empty nor a product.
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        let body = self.fetch(self.products_url(Some(id))?).await?;

        if body.trim().is_empty() {
            debug!("Product not found (empty body)");
            return Ok(None);
        }

        let raw: Option<RawProduct> = serde_json::from_str(&body).inspect_err(|e| {
            error!(error = %e, body = %excerpt(&body), "Failed to parse product");
        })?;

        if raw.is_none() {
            debug!("Product not found (null body)");
        }
        Ok(raw.map(|p| convert_product(p, self.inner.discounts.as_ref())))
    }
}
