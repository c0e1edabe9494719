//! Wercha storefront API
//!
//! Backend for an online store front end. The one subsystem with real
//! correctness risk is checkout: stock is validated and decremented
//! inside a single write transaction, so concurrent purchases of the
//! same product can never oversell. Everything else is conventional
//! request/response data access.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/     # configuration, state, server startup
//! ├── auth/     # JWT validation boundary
//! ├── api/      # HTTP routes and handlers
//! ├── orders/   # checkout engine and status state machine
//! ├── db/       # SQLite pool, models, repositories
//! └── utils/    # errors, logging, ids, time
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};
