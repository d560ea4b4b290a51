use super::reader::InventoryReader;
use super::types::{DisplayName, Inventory, InventoryHeader, Record, SymbolTable};
use crate::error::InventoryError;
use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

/// First line of every supported inventory
pub const INVENTORY_VERSION_MARKER: &str = "# Sphinx inventory version 2";

/// Length of `"# Project: "` and `"# Version: "`
pub const HEADER_PREFIX_LEN: usize = 11;

/// Marker expected on the fourth header line
pub const ZLIB_MARKER: &str = "zlib";

/// Namespaces removed from keys of the tracked project, applied in order
pub const TRACKED_NAMESPACES: [&str; 2] = ["discord.ext.commands.", "discord."];

lazy_static! {
    static ref ENTRY_REGEX: Regex =
        Regex::new(r"^(.+?)\s+(\S*:\S*)\s+(-?[0-9]+)\s+(\S+)\s+(.*)").unwrap();
}

/// Parse a whole inventory buffer.
///
/// `base_url` is the documentation root every location is joined to.
/// Keys of an inventory whose project equals `tracked_project` have the
/// [`TRACKED_NAMESPACES`] removed.
pub fn parse_inventory(
    mut reader: InventoryReader,
    base_url: &Url,
    tracked_project: &str,
) -> Result<Inventory, InventoryError> {
    let header = parse_header(&mut reader)?;
    let strip_namespaces = header.project == tracked_project;

    let mut symbols = SymbolTable::new();
    let mut skipped = 0usize;

    for line in reader.compressed_lines() {
        let line = line?;
        let Some(record) = parse_record(line.trim_end()) else {
            skipped += 1;
            tracing::trace!(line = %line, "skipping malformed inventory line");
            continue;
        };

        if record.domain == "py" && record.subdirective == "module" && symbols.contains_key(&record.name) {
            // Sphinx 1.1 and below emitted two entries per module; the first is right.
            continue;
        }

        let url = join_location(base_url, &record.resolved_location());
        symbols.insert(symbol_key(&record, strip_namespaces), url);
    }

    tracing::debug!(
        project = %header.project,
        version = %header.version,
        symbols = symbols.len(),
        skipped,
        "parsed inventory"
    );

    Ok(Inventory { header, symbols })
}

fn parse_header(reader: &mut InventoryReader) -> Result<InventoryHeader, InventoryError> {
    if reader.read_line() != INVENTORY_VERSION_MARKER {
        return Err(InventoryError::InvalidFormat("unsupported inventory version"));
    }

    let project = strip_header_prefix(&reader.read_line());
    let version = strip_header_prefix(&reader.read_line());

    if !reader.read_line().contains(ZLIB_MARKER) {
        return Err(InventoryError::InvalidFormat("not zlib-compatible"));
    }

    Ok(InventoryHeader { project, version })
}

fn strip_header_prefix(line: &str) -> String {
    line.chars().skip(HEADER_PREFIX_LEN).collect()
}

/// Apply the record grammar to one body line
pub fn parse_record(line: &str) -> Option<Record> {
    let caps = ENTRY_REGEX.captures(line)?;
    let name = caps[1].to_string();
    let (domain, subdirective) = caps[2].split_once(':')?;
    // Unused downstream; out-of-range values saturate instead of dropping the record.
    let priority = caps[3].parse().unwrap_or(if caps[3].starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    });

    // Documentation pages are addressed as labels.
    let subdirective = if domain == "std" && subdirective == "doc" {
        "label"
    } else {
        subdirective
    };

    Some(Record {
        name,
        domain: domain.to_string(),
        subdirective: subdirective.to_string(),
        priority,
        location: caps[4].to_string(),
        display_name: DisplayName::parse(&caps[5]),
    })
}

fn symbol_key(record: &Record, strip_namespaces: bool) -> String {
    let mut key = record.display_key().to_string();
    if strip_namespaces {
        for namespace in TRACKED_NAMESPACES {
            key = key.replace(namespace, "");
        }
    }

    if record.domain == "std" {
        format!("{}:{}", record.subdirective, key)
    } else {
        key
    }
}

/// `location` appended to `base` with exactly one `/` between them, as text
pub fn join_location(base: &Url, location: &str) -> String {
    format!("{}/{}", base.as_str().trim_end_matches('/'), location)
}
