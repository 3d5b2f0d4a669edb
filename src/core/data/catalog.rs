use std::collections::BTreeMap;

use super::{template::Template, types::ParameterSchema};

/// Everything known about one logical key after assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub key: String,
    pub schema: ParameterSchema,
    /// Locale to template, only for locales that define the key.
    pub templates: BTreeMap<String, Template>,
    /// True when a contract method declares the key.
    pub declared: bool,
}

impl CatalogEntry {
    pub fn template(&self, locale: &str) -> Option<&Template> {
        self.templates.get(locale)
    }

    pub fn has_template(&self, locale: &str) -> bool {
        self.templates.contains_key(locale)
    }
}

/// All entries of one contract's logical file, in key order.
///
/// Built once by the assembler and never mutated afterwards; the typed
/// accessors and the dynamic lookup are both derived from it.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub contract: String,
    pub file_name: String,
    entries: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn new(
        contract: impl Into<String>,
        file_name: impl Into<String>,
        entries: impl IntoIterator<Item = CatalogEntry>,
    ) -> Self {
        Self {
            contract: contract.into(),
            file_name: file_name.into(),
            entries: entries.into_iter().map(|e| (e.key.clone(), e)).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
