//! Sphinx `objects.inv` inventories
//!
//! An inventory is four plain-text header lines followed by a zlib stream of
//! records, one per line:
//!
//! ```text
//! # Sphinx inventory version 2
//! # Project: discord.py
//! # Version: 2.0
//! # The remainder of this file is compressed using zlib.
//! discord.Client py:class 1 api.html#$ -
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use docref::inventory::{InventoryReader, parse_inventory};
//! use url::Url;
//!
//! let bytes = std::fs::read("objects.inv").unwrap();
//! let base = Url::parse("https://docs.python.org/3").unwrap();
//! let inventory = parse_inventory(InventoryReader::new(bytes), &base, "discord.py").unwrap();
//! println!("{} symbols", inventory.symbols.len());
//! ```

mod parser;
mod reader;
mod types;

pub use parser::{
    HEADER_PREFIX_LEN, INVENTORY_VERSION_MARKER, TRACKED_NAMESPACES, join_location,
    parse_inventory, parse_record,
};
pub use reader::{CHUNK_SIZE, CompressedLines, InventoryReader};
pub use types::{DisplayName, Inventory, InventoryHeader, Record, SymbolTable};
