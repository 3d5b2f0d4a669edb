//! The callable table: per-key typed accessors, the dynamic name-based
//! lookup, and the forwarding methods of one contract.
//!
//! This is the in-process backend. The textual emitters render the same
//! table as source code.

use std::{borrow::Cow, collections::BTreeMap};

use serde_json::{Map, Value};

use super::value::{coerce, describe, display_value};
use crate::{
    core::{ParameterSchema, Template},
    error::LookupError,
};

/// Source of property values for placeholders that are not parameters.
pub trait PropertyLookup {
    fn property(&self, name: &str) -> Option<Value>;
}

/// Lookup with no properties at all.
pub struct NoProperties;

impl PropertyLookup for NoProperties {
    fn property(&self, _name: &str) -> Option<Value> {
        None
    }
}

/// A non-default locale that has its own template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleBranch {
    pub locale: String,
    pub template: Template,
}

/// The branch evaluated for every locale without its own branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// Normally the default locale; the first locale with a template when
    /// the default has none.
    Template { locale: String, template: Template },
    /// No locale defines the key: render the key itself.
    Key,
}

/// Typed accessor for one key.
#[derive(Debug, Clone)]
pub struct TypedAccessor {
    pub key: String,
    /// Identifier derived from the key.
    pub ident: String,
    pub schema: ParameterSchema,
    /// In configured locale order.
    pub branches: Vec<LocaleBranch>,
    pub fallback: Fallback,
}

impl TypedAccessor {
    /// Template used for `locale`.
    pub fn select(&self, locale: &str) -> Option<&Template> {
        self.branches
            .iter()
            .find(|branch| branch.locale == locale)
            .map(|branch| &branch.template)
            .or(match &self.fallback {
                Fallback::Template { template, .. } => Some(template),
                Fallback::Key => None,
            })
    }

    /// Validates positional arguments against the schema.
    pub fn check_arguments(&self, args: &[Value]) -> Result<Vec<Value>, LookupError> {
        if args.len() != self.schema.len() {
            return Err(LookupError::ArityMismatch {
                key: self.key.clone(),
                expected: self.schema.len(),
                found: args.len(),
            });
        }

        self.schema
            .iter()
            .zip(args)
            .map(|(parameter, arg)| {
                coerce(Some(arg), &parameter.ty).map_err(|found| LookupError::ArgumentTypeError {
                    key: self.key.clone(),
                    parameter: parameter.name.clone(),
                    expected: parameter.ty.to_string(),
                    found,
                })
            })
            .collect()
    }

    /// Checks the arguments, then renders.
    pub fn render(
        &self,
        locale: &str,
        args: &[Value],
        properties: &dyn PropertyLookup,
    ) -> Result<String, LookupError> {
        let args = self.check_arguments(args)?;
        Ok(self.render_unchecked(locale, &args, properties))
    }

    /// Renders with arguments already coerced, in schema order.
    pub fn render_unchecked(
        &self,
        locale: &str,
        args: &[Value],
        properties: &dyn PropertyLookup,
    ) -> String {
        let Some(template) = self.select(locale) else {
            return self.key.clone();
        };

        template.render(|name| match self.schema.position(name) {
            Some(index) => args.get(index).map(display_value),
            None => properties
                .property(name)
                .map(|value| Cow::Owned(display_value(&value).into_owned())),
        })
    }
}

/// A declared contract method, forwarding to its key's accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardingMethod {
    pub name: String,
    pub key: String,
    /// Every parameter name in call order.
    pub parameters: Vec<String>,
    pub locale_slot: usize,
    /// Call position of each schema parameter, in schema order.
    pub arguments: Vec<usize>,
}

/// Callable table of one contract.
#[derive(Debug, Clone)]
pub struct ContractAccessors {
    pub contract: String,
    pub file_name: String,
    /// Locales the table was generated for, in configured order.
    pub locales: Vec<String>,
    pub default_locale: String,
    accessors: BTreeMap<String, TypedAccessor>,
    methods: BTreeMap<String, ForwardingMethod>,
}

impl ContractAccessors {
    pub fn new(
        contract: impl Into<String>,
        file_name: impl Into<String>,
        locales: Vec<String>,
        default_locale: impl Into<String>,
        accessors: impl IntoIterator<Item = TypedAccessor>,
        methods: impl IntoIterator<Item = ForwardingMethod>,
    ) -> Self {
        Self {
            contract: contract.into(),
            file_name: file_name.into(),
            locales,
            default_locale: default_locale.into(),
            accessors: accessors.into_iter().map(|a| (a.key.clone(), a)).collect(),
            methods: methods.into_iter().map(|m| (m.name.clone(), m)).collect(),
        }
    }

    pub fn accessor(&self, key: &str) -> Option<&TypedAccessor> {
        self.accessors.get(key)
    }

    /// Accessors in key order.
    pub fn accessors(&self) -> impl Iterator<Item = &TypedAccessor> {
        self.accessors.values()
    }

    pub fn method(&self, name: &str) -> Option<&ForwardingMethod> {
        self.methods.get(name)
    }

    pub fn methods(&self) -> impl Iterator<Item = &ForwardingMethod> {
        self.methods.values()
    }

    /// Fails when `locale` is outside the set the table was generated for.
    pub fn check_locale(&self, locale: &str) -> Result<(), LookupError> {
        if self.locales.iter().any(|l| l == locale) {
            Ok(())
        } else {
            Err(LookupError::UnsupportedLocale(locale.to_string()))
        }
    }

    fn lookup(&self, key: &str) -> Result<&TypedAccessor, LookupError> {
        self.accessors
            .get(key)
            .ok_or_else(|| LookupError::KeyNotFound {
                contract: self.contract.clone(),
                key: key.to_string(),
            })
    }

    /// Typed call with positional arguments in schema order.
    pub fn render(
        &self,
        key: &str,
        locale: &str,
        args: &[Value],
        properties: &dyn PropertyLookup,
    ) -> Result<String, LookupError> {
        self.check_locale(locale)?;
        self.lookup(key)?.render(locale, args, properties)
    }

    /// Dynamic lookup with arguments by name.
    ///
    /// Arguments are coerced in schema order; the first missing or mistyped
    /// one fails the call. Arguments the schema does not name are ignored.
    pub fn render_by_name(
        &self,
        name: &str,
        locale: &str,
        args: &Map<String, Value>,
        properties: &dyn PropertyLookup,
    ) -> Result<String, LookupError> {
        self.check_locale(locale)?;
        let accessor = self.lookup(name)?;

        let coerced = accessor
            .schema
            .iter()
            .map(|parameter| {
                coerce(args.get(&parameter.name), &parameter.ty).map_err(|found| {
                    LookupError::ArgumentTypeError {
                        key: accessor.key.clone(),
                        parameter: parameter.name.clone(),
                        expected: parameter.ty.to_string(),
                        found,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(accessor.render_unchecked(locale, &coerced, properties))
    }

    /// Calls a declared method with its full positional argument list,
    /// locale included.
    pub fn invoke(
        &self,
        method: &str,
        args: &[Value],
        properties: &dyn PropertyLookup,
    ) -> Result<String, LookupError> {
        let forwarding = self
            .methods
            .get(method)
            .ok_or_else(|| LookupError::MethodNotFound {
                contract: self.contract.clone(),
                method: method.to_string(),
            })?;

        if args.len() != forwarding.parameters.len() {
            return Err(LookupError::ArityMismatch {
                key: forwarding.key.clone(),
                expected: forwarding.parameters.len(),
                found: args.len(),
            });
        }

        let locale = match &args[forwarding.locale_slot] {
            Value::String(locale) => locale.as_str(),
            other => {
                return Err(LookupError::ArgumentTypeError {
                    key: forwarding.key.clone(),
                    parameter: forwarding.parameters[forwarding.locale_slot].clone(),
                    expected: "locale".to_string(),
                    found: describe(other).to_string(),
                });
            }
        };

        let forwarded: Vec<Value> = forwarding
            .arguments
            .iter()
            .map(|&position| args[position].clone())
            .collect();
        self.render(&forwarding.key, locale, &forwarded, properties)
    }
}
