//! docref - documentation links from Sphinx inventories
//!
//! Downloads the `objects.inv` symbol inventory of each configured
//! documentation site, and answers short queries like `Client.run` with
//! ranked links into that documentation.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod init;
pub mod inventory;
pub mod lookup;
pub mod output;
pub mod search;

// Re-export commonly used types
pub use config::Config;
pub use error::{InventoryError, LookupError};
pub use lookup::{Answer, DocLookup, Link};
