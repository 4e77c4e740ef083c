//! Static entity registry - the canonical name → identifier table

use std::collections::HashMap;

/// One canonical entity known to the registry
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    /// Registry key the entity is filed under
    pub name: String,

    /// Canonical identifier
    pub entity_id: String,

    /// Display label
    pub label: String,
}

impl RegistryEntry {
    /// Create a registry entry
    pub fn new(
        name: impl Into<String>,
        entity_id: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            entity_id: entity_id.into(),
            label: label.into(),
        }
    }
}

/// Read-only name → (id, label) table consulted by every resolution tier
///
/// The registry is built once and never mutated afterwards, so it is safe to
/// share across concurrent resolution calls without locking.
pub struct EntityRegistry {
    entries: Vec<RegistryEntry>,
    by_folded_name: HashMap<String, usize>,
}

impl EntityRegistry {
    /// Build a registry from its entries
    ///
    /// When two entries case-fold to the same name, the first one wins.
    pub fn new(entries: Vec<RegistryEntry>) -> Self {
        let mut by_folded_name = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            by_folded_name
                .entry(entry.name.to_lowercase())
                .or_insert(index);
        }

        Self {
            entries,
            by_folded_name,
        }
    }

    /// Case-folded exact lookup
    pub fn exact(&self, query: &str) -> Option<&RegistryEntry> {
        self.by_folded_name
            .get(&query.to_lowercase())
            .map(|&index| &self.entries[index])
    }

    /// All entries, in registration order
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
