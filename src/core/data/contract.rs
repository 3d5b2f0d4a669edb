use serde::{Deserialize, Serialize};

use super::types::{ParamType, Parameter, ParameterSchema};
use crate::{error::CompileError, utils::split_humps};

/// How a method parameter takes part in localization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterRole {
    /// Supplies the target locale. Exactly one per method.
    Locale,
    /// Substituted into the template; part of the key's schema.
    #[default]
    Argument,
    /// Accepted by the method but not passed on.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MethodParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub role: ParameterRole,
}

impl MethodParameter {
    pub fn new(name: impl Into<String>, ty: impl Into<String>, role: ParameterRole) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            role,
        }
    }

    pub fn locale(name: impl Into<String>) -> Self {
        Self::new(name, "Locale", ParameterRole::Locale)
    }

    pub fn argument(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::new(name, ty, ParameterRole::Argument)
    }
}

/// A method declared on a contract, as handed over by the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContractMethod {
    pub name: String,
    /// Explicit key; derived from the method name when absent or blank.
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub parameters: Vec<MethodParameter>,
}

impl ContractMethod {
    pub fn new(name: impl Into<String>, parameters: Vec<MethodParameter>) -> Self {
        Self {
            name: name.into(),
            key: None,
            parameters,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn key_name(&self) -> String {
        match self.key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => split_humps(&self.name, '.'),
        }
    }
}

/// A localization contract: a named set of declared keys.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Contract {
    /// Qualified name (e.g., "bot.commands.HelpCommand").
    pub name: String,
    /// Explicit logical file name override.
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub methods: Vec<ContractMethod>,
}

/// Root of a contracts definition file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContractSet {
    #[serde(default)]
    pub contracts: Vec<Contract>,
}

impl Contract {
    pub fn new(name: impl Into<String>, methods: Vec<ContractMethod>) -> Self {
        Self {
            name: name.into(),
            file: None,
            methods,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Logical file name the contract reads its catalog from.
    ///
    /// Without an override, the package prefix is stripped and the simple
    /// name is converted to `segment_case`:
    /// `bot.commands.HelpCommand` with package `bot` gives
    /// `commands.help_command`.
    pub fn file_name(&self, bot_package: &str) -> String {
        if let Some(file) = self.file.as_deref().map(str::trim)
            && !file.is_empty()
        {
            return file.to_string();
        }

        let mut qualified = self.name.as_str();
        if !bot_package.is_empty()
            && let Some(rest) = qualified
                .strip_prefix(bot_package)
                .and_then(|r| r.strip_prefix('.'))
        {
            qualified = rest;
        }

        let simple = self.simple_name();
        let package = qualified.strip_suffix(simple).unwrap_or("");
        format!("{}{}", package, split_humps(simple, '_'))
    }

    /// Reads the declarations of every method.
    pub fn declarations(&self) -> Result<Vec<Declaration>, CompileError> {
        self.methods
            .iter()
            .map(|method| Declaration::from_method(&self.name, method))
            .collect()
    }
}

/// One logical key as declared by a contract method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub method: String,
    pub key: String,
    /// Argument parameters in declaration order, locale slot excluded.
    pub parameters: ParameterSchema,
    /// Position of the locale parameter in the method's parameter list.
    pub locale_slot: usize,
    /// Every method parameter name in call order.
    pub method_parameters: Vec<String>,
}

impl Declaration {
    pub fn from_method(contract: &str, method: &ContractMethod) -> Result<Self, CompileError> {
        let invalid = |reason: String| CompileError::InvalidDeclaration {
            contract: contract.to_string(),
            method: method.name.clone(),
            reason,
        };

        let locale_slots: Vec<usize> = method
            .parameters
            .iter()
            .enumerate()
            .filter(|(_, p)| p.role == ParameterRole::Locale)
            .map(|(i, _)| i)
            .collect();
        let &[locale_slot] = locale_slots.as_slice() else {
            return Err(invalid(format!(
                "expected exactly one locale parameter, found {}",
                locale_slots.len()
            )));
        };

        let mut parameters: Vec<Parameter> = Vec::new();
        let mut method_parameters: Vec<String> = Vec::new();
        for parameter in &method.parameters {
            if method_parameters.contains(&parameter.name) {
                return Err(invalid(format!(
                    "parameter '{}' is declared more than once",
                    parameter.name
                )));
            }
            method_parameters.push(parameter.name.clone());

            if parameter.role == ParameterRole::Argument {
                let ty = ParamType::parse(&parameter.ty).map_err(|e| {
                    invalid(format!("parameter '{}': {}", parameter.name, e))
                })?;
                parameters.push(Parameter::new(parameter.name.clone(), ty));
            }
        }

        Ok(Self {
            method: method.name.clone(),
            key: method.key_name(),
            parameters: ParameterSchema::new(parameters),
            locale_slot,
            method_parameters,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_file_name_derivation() {
        let contract = Contract::new("bot.commands.HelpCommand", vec![]);
        assert_eq!(contract.file_name("bot"), "commands.help_command");
        assert_eq!(contract.file_name(""), "bot.commands.help_command");
        assert_eq!(contract.file_name("other"), "bot.commands.help_command");
        assert_eq!(contract.file_name("bot.commands"), "help_command");
    }

    #[test]
    fn test_file_name_override() {
        let contract = Contract::new("bot.HelpCommand", vec![]).with_file("shared.help");
        assert_eq!(contract.file_name("bot"), "shared.help");

        let blank = Contract::new("bot.HelpCommand", vec![]).with_file("  ");
        assert_eq!(blank.file_name("bot"), "help_command");
    }

    #[test]
    fn test_file_name_without_package() {
        let contract = Contract::new("Greetings", vec![]);
        assert_eq!(contract.simple_name(), "Greetings");
        assert_eq!(contract.file_name(""), "greetings");
    }

    #[test]
    fn test_declaration_from_method() {
        let method = ContractMethod::new(
            "greetingHello",
            vec![
                MethodParameter::argument("name", "String"),
                MethodParameter::locale("locale"),
                MethodParameter::new("event", "Event", ParameterRole::Ignored),
                MethodParameter::argument("count", "Int?"),
            ],
        );

        let declaration = Declaration::from_method("Greetings", &method).unwrap();
        assert_eq!(declaration.key, "greeting.hello");
        assert_eq!(declaration.locale_slot, 1);
        assert_eq!(
            declaration.parameters,
            ParameterSchema::new(vec![
                Parameter::new("name", ParamType::text()),
                Parameter::new("count", ParamType::integer().nullable()),
            ])
        );
        assert_eq!(
            declaration.method_parameters,
            vec!["name", "locale", "event", "count"]
        );
    }

    #[test]
    fn test_declaration_explicit_key() {
        let method = ContractMethod::new("title", vec![MethodParameter::locale("l")])
            .with_key("help.page.title");
        let declaration = Declaration::from_method("Help", &method).unwrap();
        assert_eq!(declaration.key, "help.page.title");
        assert!(declaration.parameters.is_empty());
    }

    #[test]
    fn test_declaration_requires_one_locale() {
        let none = ContractMethod::new("title", vec![]);
        assert!(matches!(
            Declaration::from_method("Help", &none),
            Err(CompileError::InvalidDeclaration { .. })
        ));

        let two = ContractMethod::new(
            "title",
            vec![MethodParameter::locale("a"), MethodParameter::locale("b")],
        );
        assert!(matches!(
            Declaration::from_method("Help", &two),
            Err(CompileError::InvalidDeclaration { .. })
        ));
    }

    #[test]
    fn test_declaration_rejects_bad_type() {
        let method = ContractMethod::new(
            "title",
            vec![
                MethodParameter::locale("l"),
                MethodParameter::argument("x", "List<"),
            ],
        );
        let err = Declaration::from_method("Help", &method).unwrap_err();
        assert!(err.to_string().contains("parameter 'x'"));
    }

    #[test]
    fn test_deserialize_contract_set() {
        let json = r#"{
            "contracts": [{
                "name": "bot.Greetings",
                "methods": [{
                    "name": "hello",
                    "parameters": [
                        {"name": "locale", "type": "Locale", "role": "locale"},
                        {"name": "name", "type": "text"}
                    ]
                }]
            }]
        }"#;
        let set: ContractSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.contracts.len(), 1);
        let method = &set.contracts[0].methods[0];
        assert_eq!(method.parameters[0].role, ParameterRole::Locale);
        assert_eq!(method.parameters[1].role, ParameterRole::Argument);
        assert_eq!(set.contracts[0].file, None);
    }
}
