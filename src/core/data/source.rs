use std::collections::BTreeMap;

/// A scalar leaf of a localization source document.
///
/// The tag, when present, carries an inline parameter-list definition such
/// as `name:text,count:integer`. It is stored without the leading `!` that
/// YAML uses to introduce tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarNode {
    /// Template text, verbatim (embedded newlines included).
    pub text: String,
    pub tag: Option<String>,
}

impl ScalarNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: None,
        }
    }

    pub fn tagged(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: Some(tag.into()),
        }
    }

    /// The tag, if it holds anything but whitespace.
    pub fn parameter_tag(&self) -> Option<&str> {
        self.tag.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// Generic tree node produced by the source parsers.
///
/// Source trees are acyclic by construction; mappings keep document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceNode {
    Mapping(Vec<(String, SourceNode)>),
    Scalar(ScalarNode),
}

impl SourceNode {
    pub fn scalar(text: impl Into<String>) -> Self {
        SourceNode::Scalar(ScalarNode::new(text))
    }

    pub fn tagged(text: impl Into<String>, tag: impl Into<String>) -> Self {
        SourceNode::Scalar(ScalarNode::tagged(text, tag))
    }

    pub fn mapping<K: Into<String>>(children: impl IntoIterator<Item = (K, SourceNode)>) -> Self {
        SourceNode::Mapping(
            children
                .into_iter()
                .map(|(key, node)| (key.into(), node))
                .collect(),
        )
    }

    pub fn empty() -> Self {
        SourceNode::Mapping(Vec::new())
    }
}

/// Dotted key to leaf mapping for one locale.
pub type FlatEntries = BTreeMap<String, ScalarNode>;

/// All flattened entries of one logical file in one locale.
#[derive(Debug, Clone)]
pub struct LocaleEntries {
    /// Locale identifier (e.g., "en-US").
    pub locale: String,
    /// Path of the source file the entries were read from.
    pub file_path: String,
    pub entries: FlatEntries,
}

impl LocaleEntries {
    pub fn new(locale: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            file_path: file_path.into(),
            entries: FlatEntries::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ScalarNode> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
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
