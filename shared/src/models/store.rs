//! Store Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store entity (one document in a site's `store` collection)
///
/// Every field defaults to its zero value when absent from a payload;
/// only `code` carries identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Store {
    /// Unique within a site, used as the upsert key
    pub code: String,
    pub name: String,
    pub description: String,
    /// Identifiers of the catalogs attached to this store
    pub catalogs: Vec<String>,
    /// Coarse location / zone label
    pub area: String,
    /// Soft-delete flag. Persisted as-is; reads do not filter on it.
    pub delete: bool,
}

/// Number of distinct `area` labels handed out by [`Store::mock`]
pub const MOCK_AREA_COUNT: usize = 20;

impl Store {
    /// Build the `index`-th synthetic store
    ///
    /// Every text field gets the index appended; `area` cycles through
    /// `Area1..=Area20`.
    pub fn mock(index: usize) -> Self {
        Self {
            code: format!("store_code{index}"),
            name: format!("Store Name {index}"),
            description: format!("Store description {index}"),
            catalogs: vec![format!("c{index}")],
            area: format!("Area{}", (index % MOCK_AREA_COUNT) + 1),
            delete: false,
        }
    }
}

/// Fields a store lookup may filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreField {
    Code,
    Name,
}

impl StoreField {
    /// Document field name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for StoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
