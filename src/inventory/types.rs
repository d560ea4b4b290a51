use std::collections::HashMap;

/// Display name column of an inventory record.
///
/// Sphinx writes `-` when the display name is the same as the symbol name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayName {
    SameAsName,
    Explicit(String),
}

impl DisplayName {
    pub const SENTINEL: &'static str = "-";

    pub fn parse(raw: &str) -> Self {
        if raw == Self::SENTINEL {
            DisplayName::SameAsName
        } else {
            DisplayName::Explicit(raw.to_string())
        }
    }
}

/// One body line of an `objects.inv` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub domain: String,
    pub subdirective: String,
    pub priority: i64,
    pub location: String,
    pub display_name: DisplayName,
}

impl Record {
    /// The key users search for, before any prefix or namespace stripping
    pub fn display_key(&self) -> &str {
        match &self.display_name {
            DisplayName::SameAsName => &self.name,
            DisplayName::Explicit(display) => display,
        }
    }

    /// Location with a trailing `$` expanded to the record name
    pub fn resolved_location(&self) -> String {
        match self.location.strip_suffix('$') {
            Some(stem) => format!("{}{}", stem, self.name),
            None => self.location.clone(),
        }
    }
}

/// Project and version recovered from the inventory header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryHeader {
    pub project: String,
    pub version: String,
}

/// Symbol key to absolute URL, in first-insertion order.
///
/// Re-inserting a key replaces its URL but keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, url: String) {
        match self.positions.get(&key) {
            Some(&idx) => self.entries[idx].1 = url,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, url));
            }
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.positions
            .get(key)
            .map(|&idx| self.entries[idx].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A parsed inventory: header plus the symbol table built from its body
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub header: InventoryHeader,
    pub symbols: SymbolTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, location: &str, display: &str) -> Record {
        Record {
            name: name.to_string(),
            domain: "py".to_string(),
            subdirective: "class".to_string(),
            priority: 1,
            location: location.to_string(),
            display_name: DisplayName::parse(display),
        }
    }

    #[test]
    fn test_display_name_sentinel() {
        assert_eq!(DisplayName::parse("-"), DisplayName::SameAsName);
        assert_eq!(
            DisplayName::parse("Some Page"),
            DisplayName::Explicit("Some Page".to_string())
        );
        assert_eq!(record("a", "x", "-").display_key(), "a");
        assert_eq!(record("a", "x", "Title").display_key(), "Title");
    }

    #[test]
    fn test_dollar_location_is_concatenated() {
        assert_eq!(record("baz", "foo/bar$", "-").resolved_location(), "foo/barbaz");
        assert_eq!(record("baz", "foo/bar", "-").resolved_location(), "foo/bar");
    }

    #[test]
    fn test_symbol_table_overwrite_keeps_position() {
        let mut table = SymbolTable::new();
        table.insert("a".to_string(), "1".to_string());
        table.insert("b".to_string(), "2".to_string());
        table.insert("a".to_string(), "3".to_string());

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("a"), Some("3"));
        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
