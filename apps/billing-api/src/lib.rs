//! # billing-api
//!
//! HTTP shell over [`billing_core`]: one shared cart, JSON in and out.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET    /                        billing page (HTML)                    │
//! │  GET    /health                  liveness probe                         │
//! │  GET    /products                {products: {name: price}}              │
//! │  GET    /cart                    Bill                                   │
//! │  POST   /cart/add                {product, qty}          → Bill | 404   │
//! │  POST   /cart/discount           {discount_percent}      → Bill         │
//! │  DELETE /cart/remove/{product}                           → Bill | 404   │
//! │  DELETE /cart                    {message, cart: [], bill}              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! CORS is wide open (any origin, method and header) so the page can be
//! opened from a different host than the API.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use billing_core::Catalog;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ErrorCode};
pub use routes::router;
pub use state::LedgerState;

/// Billing page compiled into the binary.
pub const EMBEDDED_INDEX_HTML: &str = include_str!("../static/index.html");

/// Where `GET /` gets its HTML from.
#[derive(Debug, Clone)]
pub enum IndexPage {
    Embedded,
    /// Read from disk on every request, so edits show up without a restart.
    File(PathBuf),
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub ledger: LedgerState,
    pub index: IndexPage,
}

impl AppState {
    /// Creates state with an empty cart over `catalog`.
    pub fn new(catalog: Catalog, index: IndexPage) -> Self {
        let catalog = Arc::new(catalog);
        AppState {
            ledger: LedgerState::new(Arc::clone(&catalog)),
            catalog,
            index,
        }
    }

    /// Builds state from a loaded configuration.
    pub fn from_config(config: &ServerConfig) -> Self {
        let index = match &config.server.index_html {
            Some(path) => IndexPage::File(path.clone()),
            None => IndexPage::Embedded,
        };
        AppState::new(config.catalog(), index)
    }
}
