//! # staffdesk-client
//!
//! Client core for the employee/position management backend.
//!
//! The crate owns three cooperating pieces: the session store (`state`),
//! the HTTP wrapper that attaches the bearer token and classifies failures
//! (`net`), and the navigation guard that gates routes on session state
//! (`router`). Browser bindings for storage, navigation and `fetch` are
//! compiled in with the `hydrate` feature.

pub mod config;
pub mod error;
pub mod net;
pub mod router;
pub mod state;

pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, ErrorClass};
pub use net::api::ApiClient;
pub use router::{Navigation, Navigator, Route, RouteOutcome, Router};
pub use state::session::{Session, SessionStore};
pub use state::storage::{MemoryStorage, TokenStorage};

/// Install the panic hook and the `tracing` console subscriber.
///
/// Runs once when the WASM module is instantiated.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn init_browser() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
}
