use crate::error::LookupError;
use crate::fetch::Fetch;
use crate::inventory::{InventoryReader, SymbolTable, join_location, parse_inventory};
use std::{
    collections::{BTreeMap, HashMap},
    future::Future,
    sync::Arc,
    time::Instant,
};
use tokio::sync::OnceCell;
use url::Url;

pub type SourceTables = HashMap<String, Arc<SymbolTable>>;

/// Symbol tables for every source, built once on first use.
///
/// A failed build leaves the cache empty so the next caller starts over.
/// Callers arriving while a build is running wait for it instead of
/// starting their own.
#[derive(Debug, Default)]
pub struct SourceCache {
    tables: OnceCell<SourceTables>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_populated(&self) -> bool {
        self.tables.initialized()
    }

    pub fn get(&self, source_id: &str) -> Option<Arc<SymbolTable>> {
        self.tables.get()?.get(source_id).cloned()
    }

    /// Return the published tables, running `build` if there are none yet
    pub async fn get_or_build<F, Fut>(&self, build: F) -> Result<&SourceTables, LookupError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<SourceTables, LookupError>>,
    {
        self.tables.get_or_try_init(build).await
    }
}

/// URL of the inventory published under `base`
pub fn inventory_url(base: &Url) -> String {
    join_location(base, "objects.inv")
}

/// Fetch and parse every source, in source-id order.
///
/// Any failure aborts the whole build; nothing is returned for the sources
/// that did succeed.
pub async fn build_tables(
    fetcher: &dyn Fetch,
    sources: &BTreeMap<String, Url>,
    tracked_project: &str,
) -> Result<SourceTables, LookupError> {
    let mut tables = SourceTables::with_capacity(sources.len());

    for (source_id, base) in sources {
        let start = Instant::now();
        let url = inventory_url(base);

        let response = fetcher
            .fetch(&url)
            .await
            .map_err(|source| LookupError::Transport {
                url: url.clone(),
                source,
            })?;

        if !response.is_success() {
            return Err(LookupError::Status {
                url,
                status: response.status,
            });
        }

        let inventory = parse_inventory(
            InventoryReader::new(response.body),
            base,
            tracked_project,
        )
        .map_err(|source| LookupError::Inventory {
            source_id: source_id.clone(),
            source,
        })?;

        tracing::debug!(
            source = %source_id,
            project = %inventory.header.project,
            symbols = inventory.symbols.len(),
            elapsed = ?start.elapsed(),
            "built lookup table"
        );
        tables.insert(source_id.clone(), Arc::new(inventory.symbols));
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_url() {
        let base = Url::parse("https://docs.python.org/3").unwrap();
        assert_eq!(inventory_url(&base), "https://docs.python.org/3/objects.inv");

        let base = Url::parse("https://docs.python.org/3/").unwrap();
        assert_eq!(inventory_url(&base), "https://docs.python.org/3/objects.inv");

        let base = Url::parse("https://example.com").unwrap();
        assert_eq!(inventory_url(&base), "https://example.com/objects.inv");
    }

    #[tokio::test]
    async fn test_failed_build_publishes_nothing() {
        let cache = SourceCache::new();
        let result = cache
            .get_or_build(|| async {
                Err(LookupError::Status {
                    url: "https://example.com/objects.inv".to_string(),
                    status: 500,
                })
            })
            .await;
        assert!(result.is_err());
        assert!(!cache.is_populated());
        assert!(cache.get("latest").is_none());

        let mut tables = SourceTables::new();
        tables.insert("latest".to_string(), Arc::new(SymbolTable::new()));
        cache.get_or_build(|| async { Ok(tables) }).await.unwrap();
        assert!(cache.is_populated());
        assert!(cache.get("latest").is_some());
    }
}
