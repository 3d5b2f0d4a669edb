use std::{borrow::Cow, fmt::Write, fs, path::Path};

use serde_yaml::Value;

use crate::core::{ScalarNode, SourceNode};
use crate::error::CompileError;

/// Reads a YAML localization source.
pub fn parse_yaml_file(path: &Path) -> Result<SourceNode, CompileError> {
    let content = fs::read_to_string(path).map_err(|e| CompileError::Source {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_yaml_str(&content, &path.display().to_string())
}

/// Parses YAML text into a source tree.
///
/// Scalar tags (`!name:text`) are kept without the leading `!`; tags on
/// mappings are ignored. Sequences have no meaning in a catalog and are
/// rejected.
///
/// Parameter lists may be written as plain tags
/// (`!name:text,count:integer`, `!items:List[text]`) or verbatim
/// (`!<name:text,count:integer>`). Percent escapes in a tag are decoded.
pub fn parse_yaml_str(content: &str, file_path: &str) -> Result<SourceNode, CompileError> {
    if content.trim().is_empty() {
        return Ok(SourceNode::empty());
    }

    let content = normalize_tags(content);
    let value: Value = serde_yaml::from_str(&content).map_err(|e| CompileError::Source {
        path: file_path.to_string(),
        reason: e.to_string(),
    })?;

    match value {
        Value::Null => Ok(SourceNode::empty()),
        other => convert(other, None, "", file_path),
    }
}

fn convert(
    value: Value,
    tag: Option<String>,
    key_path: &str,
    file_path: &str,
) -> Result<SourceNode, CompileError> {
    let unsupported = |what: &str| CompileError::Source {
        path: file_path.to_string(),
        reason: format!("unsupported {} at '{}'", what, key_path),
    };

    match value {
        Value::Mapping(map) => {
            let mut children = Vec::with_capacity(map.len());
            for (key, child) in map {
                let key = match key {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => return Err(unsupported("mapping key")),
                };
                let child_path = if key_path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", key_path, key)
                };
                children.push((key, convert(child, None, &child_path, file_path)?));
            }
            Ok(SourceNode::Mapping(children))
        }
        Value::Tagged(tagged) => {
            let tag = tagged.tag.to_string().trim_start_matches('!').to_string();
            convert(tagged.value, Some(tag), key_path, file_path)
        }
        Value::String(text) => Ok(scalar(text, tag)),
        Value::Number(n) => Ok(scalar(n.to_string(), tag)),
        Value::Bool(b) => Ok(scalar(b.to_string(), tag)),
        Value::Null => Ok(scalar(String::new(), tag)),
        Value::Sequence(_) => Err(unsupported("sequence")),
    }
}

fn scalar(text: String, tag: Option<String>) -> SourceNode {
    SourceNode::Scalar(ScalarNode { text, tag })
}

/// Characters the YAML scanner accepts in a shorthand tag suffix.
const TAG_CHARS: &str = "-_;/?:@&=+$.%!~*'()";

/// Rewrites value tags into shorthand tags the YAML scanner accepts.
///
/// `,`, `[`, `]`, `<` and `>` are not allowed in a shorthand tag, so they are
/// percent-encoded; the scanner decodes them again. Verbatim tags never reach
/// the value tree and are turned into the equivalent shorthand. Block scalar
/// content and flow collections are left as written.
fn normalize_tags(content: &str) -> Cow<'_, str> {
    let mut out = String::with_capacity(content.len());
    let mut changed = false;
    // Indent of the key whose block scalar is being read.
    let mut block_parent: Option<usize> = None;
    // Indent of the key whose value starts on a following line.
    let mut pending: Option<usize> = Some(0);

    for line in content.split_inclusive('\n') {
        let body = line.trim_end_matches(['\n', '\r']);
        let indent = body.len() - body.trim_start_matches(' ').len();
        let rest = &body[indent..];

        if let Some(parent) = block_parent {
            if rest.is_empty() || indent > parent {
                out.push_str(line);
                continue;
            }
            block_parent = None;
        }
        if rest.is_empty() || rest.starts_with('#') {
            out.push_str(line);
            continue;
        }
        if rest == "---" {
            pending = Some(0);
            out.push_str(line);
            continue;
        }

        let (offset, parent) = match (pending.take(), value_offset(rest)) {
            (Some(parent), _) if rest.starts_with('!') => (0, parent),
            (_, Some(offset)) => (offset, indent),
            (_, None) => {
                out.push_str(line);
                continue;
            }
        };

        let start = indent + offset;
        let mut value = &body[start..];
        let mut rewritten = None;
        if value.starts_with('!') {
            let end = value.find(char::is_whitespace).unwrap_or(value.len());
            rewritten = normalize_tag(&value[..end]).map(|tag| (tag, end));
            value = value[end..].trim_start();
            if value.is_empty() || value.starts_with('#') {
                pending = Some(parent);
            }
        } else if value.is_empty() || value.starts_with('#') {
            pending = Some(indent);
        }
        if value.starts_with(['|', '>']) {
            block_parent = Some(parent);
        }

        match rewritten {
            Some((tag, end)) => {
                changed = true;
                out.push_str(&line[..start]);
                out.push_str(&tag);
                out.push_str(&line[start + end..]);
            }
            None => out.push_str(line),
        }
    }

    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(content)
    }
}

/// Byte offset of the value after a block mapping key, if `line` has one.
fn value_offset(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut i = 0;
    if let Some(&quote) = bytes.first().filter(|b| matches!(b, b'"' | b'\'')) {
        i = 1;
        while i < bytes.len() && bytes[i] != quote {
            if quote == b'"' && bytes[i] == b'\\' {
                i += 1;
            }
            i += 1;
        }
        i += 1;
    }
    while i < bytes.len() {
        match bytes[i] {
            b':' if bytes.get(i + 1).is_none_or(|b| *b == b' ' || *b == b'\t') => {
                let value = &line[i + 1..];
                return Some(line.len() - value.trim_start().len());
            }
            b'#' if i > 0 && bytes[i - 1] == b' ' => return None,
            _ => i += 1,
        }
    }
    None
}

/// Shorthand form of `token`, or `None` when it can be kept as is.
fn normalize_tag(token: &str) -> Option<String> {
    if token == "!" || token.starts_with("!!") {
        return None;
    }
    let suffix = match token.strip_prefix("!<") {
        Some(verbatim) => {
            let inner = verbatim.strip_suffix('>')?;
            // Standard URIs such as `tag:yaml.org,2002:str` carry no parameters.
            if inner.starts_with("tag:") {
                return None;
            }
            inner.strip_prefix('!').unwrap_or(inner)
        }
        None => &token[1..],
    };

    let mut tag = String::from("!");
    for c in suffix.chars() {
        if c.is_ascii_alphanumeric() || TAG_CHARS.contains(c) {
            tag.push(c);
        } else {
            let mut buf = [0; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                let _ = write!(tag, "%{:02X}", byte);
            }
        }
    }
    (tag != token).then_some(tag)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_nested_mapping() {
        let content = "greeting:\n  hello: Hi {name}\n  bye: Bye\n";
        let node = parse_yaml_str(content, "en.yaml").unwrap();
        assert_eq!(
            node,
            SourceNode::mapping([(
                "greeting",
                SourceNode::mapping([
                    ("hello", SourceNode::scalar("Hi {name}")),
                    ("bye", SourceNode::scalar("Bye")),
                ])
            )])
        );
    }

    #[test]
    fn test_parse_tagged_scalar() {
        let content = "farewell: !name:text Bye {name}\n";
        let node = parse_yaml_str(content, "en.yaml").unwrap();
        assert_eq!(
            node,
            SourceNode::mapping([(
                "farewell",
                SourceNode::tagged("Bye {name}", "name:text")
            )])
        );
    }

    fn tag_of(content: &str, key: &str) -> Option<String> {
        let SourceNode::Mapping(children) = parse_yaml_str(content, "en.yaml").unwrap() else {
            panic!("expected a mapping");
        };
        let (_, node) = children.into_iter().find(|(k, _)| k == key).unwrap();
        let SourceNode::Scalar(scalar) = node else {
            panic!("expected a scalar at '{}'", key);
        };
        scalar.tag
    }

    #[test]
    fn test_parse_parameter_list_tags() {
        let content = "\
cart: !name:text,count:integer Hi {name}, {count} items
labels: !items:List[text] Items {items}
scores: !scores:Map<text,integer> Scores {scores}
";
        assert_eq!(
            tag_of(content, "cart").as_deref(),
            Some("name:text,count:integer")
        );
        assert_eq!(tag_of(content, "labels").as_deref(), Some("items:List[text]"));
        assert_eq!(
            tag_of(content, "scores").as_deref(),
            Some("scores:Map<text,integer>")
        );
    }

    #[test]
    fn test_parse_verbatim_and_escaped_tags() {
        let content = "\
cart: !<name:text,count:integer> Hi {name}, {count} items
bang: !<!name:text> Hi {name}
escaped: !name:text%2Ccount:integer Hi {name}
";
        assert_eq!(
            tag_of(content, "cart").as_deref(),
            Some("name:text,count:integer")
        );
        assert_eq!(tag_of(content, "bang").as_deref(), Some("name:text"));
        assert_eq!(
            tag_of(content, "escaped").as_deref(),
            Some("name:text,count:integer")
        );
    }

    #[test]
    fn test_parse_tag_on_following_line() {
        let content = "farewell:\n  !name:text,count:integer Bye {name}\n";
        assert_eq!(
            tag_of(content, "farewell").as_deref(),
            Some("name:text,count:integer")
        );
    }

    #[test]
    fn test_block_scalar_content_is_not_rewritten() {
        let content = "\
help: !name:text |
  Hi {name}
  usage: !not,a tag
after: !count:integer Count {count}
";
        let node = parse_yaml_str(content, "en.yaml").unwrap();
        assert_eq!(
            node,
            SourceNode::mapping([
                (
                    "help",
                    SourceNode::tagged("Hi {name}\nusage: !not,a tag\n", "name:text")
                ),
                ("after", SourceNode::tagged("Count {count}", "count:integer")),
            ])
        );
    }

    #[test]
    fn test_normalize_tags() {
        let plain = "a: !name:text Hi\nb: \"!x,y\"\nc: !!str 10\n";
        assert!(matches!(normalize_tags(plain), Cow::Borrowed(_)));

        assert_eq!(
            normalize_tags("a: !n:List[text] Hi {n} # note\n"),
            "a: !n:List%5Btext%5D Hi {n} # note\n"
        );
        assert_eq!(
            normalize_tags("\"k: 1\": !<a:text,b:text> x\n"),
            "\"k: 1\": !a:text%2Cb:text x\n"
        );
        assert_eq!(tag_of("limit: !!str 10\n", "limit"), None);
    }

    #[test]
    fn test_parse_block_scalar_keeps_newlines() {
        let content = "help: |\n  Line one\n  Line two\n";
        let node = parse_yaml_str(content, "en.yaml").unwrap();
        assert_eq!(
            node,
            SourceNode::mapping([("help", SourceNode::scalar("Line one\nLine two\n"))])
        );
    }

    #[test]
    fn test_parse_non_string_scalars_and_keys() {
        let content = "404: Not found\nlimit: 10\nflag: true\nnothing: null\n";
        let node = parse_yaml_str(content, "en.yaml").unwrap();
        assert_eq!(
            node,
            SourceNode::mapping([
                ("404", SourceNode::scalar("Not found")),
                ("limit", SourceNode::scalar("10")),
                ("flag", SourceNode::scalar("true")),
                ("nothing", SourceNode::scalar("")),
            ])
        );
    }

    #[test]
    fn test_parse_empty_document() {
        assert_eq!(parse_yaml_str("", "en.yaml").unwrap(), SourceNode::empty());
        assert_eq!(parse_yaml_str("  \n", "en.yaml").unwrap(), SourceNode::empty());
    }

    #[test]
    fn test_parse_rejects_sequences() {
        let err = parse_yaml_str("items:\n  - a\n  - b\n", "en.yaml").unwrap_err();
        assert!(err.to_string().contains("sequence at 'items'"));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = parse_yaml_str("a: [unclosed", "broken.yaml").unwrap_err();
        assert!(matches!(err, CompileError::Source { ref path, .. } if path == "broken.yaml"));
    }
}
