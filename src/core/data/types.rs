//! Parameter types and parameter schemas.
//!
//! Type strings come from two places: explicit contract declarations and
//! inline tags in source files (`name:text,count:integer`). Both resolve to
//! the same [`ParamType`] so schemas can be compared structurally.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Resolved shape of a parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Integer,
    Float,
    Boolean,
    Text,
    Any,
    /// Opaque reference to a host type, possibly parameterized
    /// (`List<text>`, `Map[text, integer]`).
    Named {
        name: String,
        arguments: Vec<ParamType>,
    },
}

/// A parameter type, optionally nullable (`text?`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamType {
    pub kind: TypeKind,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeParseError {
    #[error("empty type")]
    Empty,
    #[error("unbalanced brackets in '{0}'")]
    Unbalanced(String),
    #[error("missing type arguments in '{0}'")]
    MissingArguments(String),
}

impl ParamType {
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    pub fn integer() -> Self {
        Self::new(TypeKind::Integer)
    }

    pub fn float() -> Self {
        Self::new(TypeKind::Float)
    }

    pub fn boolean() -> Self {
        Self::new(TypeKind::Boolean)
    }

    pub fn text() -> Self {
        Self::new(TypeKind::Text)
    }

    pub fn any() -> Self {
        Self::new(TypeKind::Any)
    }

    pub fn named(name: impl Into<String>, arguments: Vec<ParamType>) -> Self {
        Self::new(TypeKind::Named {
            name: name.into(),
            arguments,
        })
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Parses a type string.
    ///
    /// Built-in names are matched case-insensitively; anything else becomes
    /// an opaque named reference. Generic arguments may use `<>` or `[]`.
    pub fn parse(input: &str) -> Result<Self, TypeParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TypeParseError::Empty);
        }

        if let Some(inner) = trimmed.strip_suffix('?') {
            return Ok(Self::parse(inner)?.nullable());
        }

        if trimmed == "*" {
            return Ok(Self::any());
        }

        if let Some(open) = trimmed.find(['<', '[']) {
            let close = if trimmed[open..].starts_with('<') {
                '>'
            } else {
                ']'
            };
            if !trimmed.ends_with(close) {
                return Err(TypeParseError::Unbalanced(trimmed.to_string()));
            }

            let base = trimmed[..open].trim();
            if base.is_empty() {
                return Err(TypeParseError::Unbalanced(trimmed.to_string()));
            }

            let inner = &trimmed[open + 1..trimmed.len() - 1];
            let parts = split_top_level(inner)
                .ok_or_else(|| TypeParseError::Unbalanced(trimmed.to_string()))?;
            if parts.iter().all(|p| p.is_empty()) {
                return Err(TypeParseError::MissingArguments(trimmed.to_string()));
            }

            let arguments = parts
                .into_iter()
                .map(Self::parse)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Self::named(base, arguments));
        }

        if trimmed.contains(['>', ']', ',']) {
            return Err(TypeParseError::Unbalanced(trimmed.to_string()));
        }

        Ok(primitive(trimmed).unwrap_or_else(|| Self::named(trimmed, Vec::new())))
    }
}

fn primitive(name: &str) -> Option<ParamType> {
    let kind = match name.to_ascii_lowercase().as_str() {
        "integer" | "int" | "long" | "short" | "byte" | "i32" | "i64" | "u32" | "u64" => {
            TypeKind::Integer
        }
        "float" | "double" | "f32" | "f64" => TypeKind::Float,
        "boolean" | "bool" => TypeKind::Boolean,
        "text" | "string" | "str" | "char" => TypeKind::Text,
        "any" => TypeKind::Any,
        _ => return None,
    };
    Some(ParamType::new(kind))
}

/// Splits on commas that are not nested inside `<>` or `[]`.
///
/// Returns `None` when the brackets do not balance.
pub(crate) fn split_top_level(input: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth: usize = 0;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        match c {
            '<' | '[' => depth += 1,
            '>' | ']' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(input[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return None;
    }
    parts.push(input[start..].trim());
    Some(parts)
}

impl FromStr for ParamType {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Integer => write!(f, "integer")?,
            TypeKind::Float => write!(f, "float")?,
            TypeKind::Boolean => write!(f, "boolean")?,
            TypeKind::Text => write!(f, "text")?,
            TypeKind::Any => write!(f, "any")?,
            TypeKind::Named { name, arguments } => {
                write!(f, "{}", name)?;
                if !arguments.is_empty() {
                    let args: Vec<String> = arguments.iter().map(|a| a.to_string()).collect();
                    write!(f, "<{}>", args.join(", "))?;
                }
            }
        }
        if self.nullable {
            write!(f, "?")?;
        }
        Ok(())
    }
}

/// One named, typed parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub name: String,
    pub ty: ParamType,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.ty)
    }
}

/// Ordered parameter list a key's accessor accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParameterSchema(Vec<Parameter>);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterListError {
    #[error("'{0}' is not a 'name:type' pair")]
    MissingSeparator(String),
    #[error("parameter without a name in '{0}'")]
    EmptyName(String),
    #[error("parameter '{0}' is defined more than once")]
    DuplicateName(String),
    #[error("unbalanced brackets in '{0}'")]
    Unbalanced(String),
    #[error("parameter '{name}': {source}")]
    InvalidType {
        name: String,
        source: TypeParseError,
    },
}

impl ParameterSchema {
    pub fn new(parameters: Vec<Parameter>) -> Self {
        Self(parameters)
    }

    /// Parses a comma-separated `name:type` list.
    ///
    /// Commas nested inside generic brackets do not split parameters. A blank
    /// definition yields an empty schema.
    pub fn parse(definition: &str) -> Result<Self, ParameterListError> {
        if definition.trim().is_empty() {
            return Ok(Self::default());
        }

        let parts = split_top_level(definition)
            .ok_or_else(|| ParameterListError::Unbalanced(definition.to_string()))?;

        let mut parameters: Vec<Parameter> = Vec::with_capacity(parts.len());
        for part in parts {
            let (name, ty) = part
                .split_once(':')
                .ok_or_else(|| ParameterListError::MissingSeparator(part.to_string()))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(ParameterListError::EmptyName(part.to_string()));
            }
            if parameters.iter().any(|p| p.name == name) {
                return Err(ParameterListError::DuplicateName(name.to_string()));
            }
            let ty = ParamType::parse(ty).map_err(|source| ParameterListError::InvalidType {
                name: name.to_string(),
                source,
            })?;
            parameters.push(Parameter::new(name, ty));
        }

        Ok(Self(parameters))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.0.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.0.iter().find(|p| p.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a ParameterSchema {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ParameterSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(no parameters)");
        }
        let parts: Vec<String> = self.0.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}
