//! Integration test support for Souk.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p souk-integration-tests
//! ```
//!
//! No external services are needed: [`FakeCatalog`] serves a small product
//! catalog from a local `axum` router, and cart tests use a store file in a
//! per-test `tempfile` directory ([`TempStorePath`]).
//!
//! # Fake catalog routes
//!
//! - `GET /products` - [`catalog_records`], in order
//! - `GET /products/{id}` - the matching record, or an empty `200` body
//! - `GET /products/null` - a literal `null` body
//! - `GET /products/500` - `500 Internal Server Error`
//! - `GET /products/garbage` - truncated JSON
//! - `GET /broken/products` - `503 Service Unavailable`
//! - `GET /garbled/products` - a body that is not JSON

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::{
    Json, Router,
    extract::Path as UrlPath,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use souk_storefront::config::{CatalogConfig, StorefrontConfig};
use tempfile::TempDir;
use url::Url;

/// Raw records served by [`FakeCatalog`].
#[must_use]
pub fn catalog_records() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }),
        json!({
            "id": 2,
            "title": "Mens Casual Premium Slim Fit T-Shirts",
            "price": 50,
            "description": "Slim-fitting style",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/71-3HjGNDUL._AC_SY879._SX._UX._SY._UY_.jpg",
            "rating": { "rate": 4.1, "count": 259 }
        }),
        json!({
            "id": 3,
            "title": "Mens Cotton Jacket",
            "price": 100,
            "description": "Great outerwear jackets",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/71li-ujtlUL._AC_UX679_.jpg",
            "rating": { "rate": 4.7, "count": 500 }
        }),
    ]
}

async fn list_products() -> Json<Vec<Value>> {
    Json(catalog_records())
}

async fn get_product(UrlPath(id): UrlPath<String>) -> Response {
    match id.as_str() {
        "null" => (StatusCode::OK, "null").into_response(),
        "500" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        "garbage" => (StatusCode::OK, "{\"id\": 1, \"title\":").into_response(),
        other => catalog_records()
            .into_iter()
            .find(|record| record["id"].to_string() == other)
            .map_or_else(
                || (StatusCode::OK, "").into_response(),
                |record| Json(record).into_response(),
            ),
    }
}

async fn broken() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response()
}

async fn garbled() -> Response {
    (StatusCode::OK, "<html>not json</html>").into_response()
}

/// A catalog server bound to an ephemeral local port.
pub struct FakeCatalog {
    addr: SocketAddr,
}

impl FakeCatalog {
    /// Bind and start serving in the background.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    #[allow(clippy::expect_used)]
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/products", get(list_products))
            .route("/products/{id}", get(get_product))
            .route("/broken/products", get(broken))
            .route("/garbled/products", get(garbled));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake catalog");
        let addr = listener.local_addr().expect("Failed to read local address");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr }
    }

    /// Base URL of the well-behaved catalog.
    #[must_use]
    pub fn url(&self) -> Url {
        self.url_at("/")
    }

    /// Base URL with a path prefix, e.g. `/broken/`.
    ///
    /// # Panics
    ///
    /// Panics if `path` does not form a valid URL.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn url_at(&self, path: &str) -> Url {
        Url::parse(&format!("http://{}{path}", self.addr)).expect("Invalid fake catalog URL")
    }

    /// Catalog configuration pointing at [`Self::url_at`].
    #[must_use]
    pub fn config_at(&self, path: &str) -> CatalogConfig {
        CatalogConfig {
            base_url: self.url_at(path),
        }
    }
}

/// A store file inside a fresh temporary directory, removed on drop.
pub struct TempStorePath {
    dir: TempDir,
}

impl TempStorePath {
    /// Create a fresh directory whose name starts with `label`.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new(label: &str) -> Self {
        let dir = tempfile::Builder::new()
            .prefix(&format!("souk-it-{label}-"))
            .tempdir()
            .expect("Failed to create temp dir");
        Self { dir }
    }

    /// Path of the store file (created on first write).
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("storage.json")
    }

    /// Directory holding the store file.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// A storefront configuration using this store and `catalog`.
    #[must_use]
    pub fn config(&self, catalog: CatalogConfig) -> StorefrontConfig {
        StorefrontConfig {
            catalog,
            store_path: self.path(),
        }
    }
}
