//! Runtime catalog registry.
//!
//! Holds the generated tables, the locale configuration and the shared
//! property bag, and hands out one memoized provider per contract.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use parking_lot::{Mutex, RwLock};
use serde_json::{Map, Value};

use crate::{
    accessor::{ContractAccessors, PropertyLookup, value::coerce},
    core::ParamType,
    error::LookupError,
};

/// Shared mutable property values.
///
/// The host writes; providers read at render time.
#[derive(Debug, Default)]
pub struct PropertyBag {
    values: RwLock<HashMap<String, Value>>,
}

impl PropertyBag {
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.values.write().insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.read().get(name).cloned()
    }

    pub fn remove(&self, name: &str) -> Option<Value> {
        self.values.write().remove(name)
    }
}

pub struct CatalogRegistry {
    manager_name: String,
    locales: Vec<String>,
    default_locale: String,
    property_types: BTreeMap<String, ParamType>,
    properties: Arc<PropertyBag>,
    implementations: HashMap<String, Arc<ContractAccessors>>,
    providers: Mutex<HashMap<String, Arc<Provider>>>,
}

impl CatalogRegistry {
    pub fn new(
        manager_name: impl Into<String>,
        locales: Vec<String>,
        default_locale: impl Into<String>,
        property_types: BTreeMap<String, ParamType>,
        tables: impl IntoIterator<Item = ContractAccessors>,
    ) -> Self {
        Self {
            manager_name: manager_name.into(),
            locales,
            default_locale: default_locale.into(),
            property_types,
            properties: Arc::new(PropertyBag::default()),
            implementations: tables
                .into_iter()
                .map(|table| (table.contract.clone(), Arc::new(table)))
                .collect(),
            providers: Mutex::new(HashMap::new()),
        }
    }

    pub fn manager_name(&self) -> &str {
        &self.manager_name
    }

    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// The shared property bag. Values written here are visible to every
    /// provider.
    pub fn properties(&self) -> &Arc<PropertyBag> {
        &self.properties
    }

    pub fn property_types(&self) -> &BTreeMap<String, ParamType> {
        &self.property_types
    }

    /// Contract names with a generated implementation, sorted.
    pub fn contracts(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.implementations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the provider of `contract`, creating it on first access.
    ///
    /// Construction happens under the cache lock, so concurrent first
    /// accesses still observe a single instance.
    pub fn get_provider(&self, contract: &str) -> Result<Arc<Provider>, LookupError> {
        let mut providers = self.providers.lock();
        if let Some(provider) = providers.get(contract) {
            return Ok(Arc::clone(provider));
        }

        let table = self
            .implementations
            .get(contract)
            .ok_or_else(|| LookupError::ProviderNotFound(contract.to_string()))?;

        let provider = Arc::new(Provider {
            table: Arc::clone(table),
            property_types: self.property_types.clone(),
            properties: Arc::clone(&self.properties),
        });
        providers.insert(contract.to_string(), Arc::clone(&provider));
        tracing::debug!(contract, "created provider");
        Ok(provider)
    }
}

/// Renders the keys of one contract.
pub struct Provider {
    table: Arc<ContractAccessors>,
    property_types: BTreeMap<String, ParamType>,
    properties: Arc<PropertyBag>,
}

impl Provider {
    pub fn contract(&self) -> &str {
        &self.table.contract
    }

    pub fn table(&self) -> &ContractAccessors {
        &self.table
    }

    /// Typed call with positional arguments in schema order.
    pub fn render(&self, key: &str, locale: &str, args: &[Value]) -> Result<String, LookupError> {
        self.table.render(key, locale, args, self)
    }

    pub fn render_by_name(
        &self,
        name: &str,
        locale: &str,
        args: &Map<String, Value>,
    ) -> Result<String, LookupError> {
        self.table.render_by_name(name, locale, args, self)
    }

    /// Calls a declared contract method.
    pub fn invoke(&self, method: &str, args: &[Value]) -> Result<String, LookupError> {
        self.table.invoke(method, args, self)
    }

    /// Reads a declared property, checked against its declared type.
    pub fn property(&self, name: &str) -> Result<Value, LookupError> {
        let ty = self
            .property_types
            .get(name)
            .ok_or_else(|| LookupError::PropertyNotDeclared(name.to_string()))?;
        coerce(self.properties.get(name).as_ref(), ty).map_err(|found| {
            LookupError::PropertyTypeError {
                name: name.to_string(),
                expected: ty.to_string(),
                found,
            }
        })
    }
}

/// Undeclared, unset and mistyped properties all leave their placeholder
/// in place.
impl PropertyLookup for Provider {
    fn property(&self, name: &str) -> Option<Value> {
        let ty = self.property_types.get(name)?;
        let value = self.properties.get(name)?;
        coerce(Some(&value), ty).ok()
    }
}
