//! Web server module for scroll-locator
//!
//! HTTP API around a single shared session.
//!
//! # Usage
//!
//! Enable the `web` feature and use the `serve` subcommand:
//!
//! ```bash
//! cargo build --features web
//! scroll-locator serve --port 8080
//! ```

mod routes;
mod server;

pub use routes::{
    AppError, AppState, HealthResponse, SectionEntry, SelectSectionRequest, SessionResponse,
    PHOTO_FIELD,
};
pub use server::{ServerConfig, WebServer};

/// Default server port
pub const DEFAULT_PORT: u16 = 8080;

/// Default bind address
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Default upload limit in bytes (20 MB)
pub const DEFAULT_UPLOAD_LIMIT: usize = 20 * 1024 * 1024;
