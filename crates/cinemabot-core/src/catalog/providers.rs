use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use super::PayloadError;

/// Read-only mapping from provider id to display name.
///
/// Built once at startup and shared between handlers without locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderTable {
    names: HashMap<u64, String>,
}

impl ProviderTable {
    /// Build the table from a provider listing.
    ///
    /// Entries without an `id` or a non-empty `clear_name` are skipped.
    ///
    /// # Errors
    ///
    /// Returns `PayloadError::InvalidField` if the listing is not an array.
    pub fn from_json(json: &Value) -> Result<Self, PayloadError> {
        let entries = json
            .as_array()
            .ok_or(PayloadError::InvalidField("providers"))?;

        let mut names = HashMap::with_capacity(entries.len());
        for entry in entries {
            let id = entry.get("id").and_then(Value::as_u64);
            let name = entry
                .get("clear_name")
                .and_then(Value::as_str)
                .filter(|name| !name.is_empty());

            match (id, name) {
                (Some(id), Some(name)) => {
                    names.insert(id, name.to_string());
                }
                _ => debug!(?entry, "Skipping provider without id or display name"),
            }
        }

        Ok(Self { names })
    }

    /// Display name for a provider id
    #[must_use]
    pub fn name(&self, provider_id: u64) -> Option<&str> {
        self.names.get(&provider_id).map(String::as_str)
    }

    /// Number of known providers
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table has no providers
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(u64, String)> for ProviderTable {
    fn from_iter<I: IntoIterator<Item = (u64, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}
