//! YAML front matter handling.
//!
//! Pages start with an optional block:
//!
//! ```text
//! ---
//! title: Create item
//! route: POST /items/{id}
//! ---
//! Body...
//! ```
//!
//! Updates are line-based: [`FrontMatter::set`] rewrites one `key: value`
//! line and leaves every other line (comments, nested maps, quoting) exactly
//! as written. Reads go through `serde_yaml` so quoted and block scalars
//! resolve correctly, with a raw line lookup as fallback for blocks that are
//! not strictly valid YAML.

use std::sync::LazyLock;

use regex::Regex;

/// Front matter block at the start of a document.
static FRONT_MATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*---[\r\n]+([\s\S]*?)[\r\n]+---").expect("invalid front matter regex")
});

/// Front matter block followed by the document body.
static DOCUMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*---[\r\n]+([\s\S]*?)[\r\n]+\s*---(?:[\r\n]+|$)([\s\S]*)")
        .expect("invalid document regex")
});

/// Document body with the front matter removed and surrounding whitespace
/// trimmed. Documents without front matter are returned unchanged.
#[must_use]
pub fn body(content: &str) -> &str {
    DOCUMENT_RE
        .captures(content)
        .and_then(|caps| caps.get(2))
        .map_or(content, |m| m.as_str().trim())
}

/// Raw YAML text of a front matter block (without the `---` fences).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    yaml: String,
}

impl FrontMatter {
    /// Empty block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract the front matter block from a document.
    #[must_use]
    pub fn parse(content: &str) -> Option<Self> {
        FRONT_MATTER_RE
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| Self {
                yaml: m.as_str().to_owned(),
            })
    }

    /// Raw value text of a top-level `key: value` line.
    ///
    /// Everything after the first colon is returned trimmed, quotes included.
    /// When a key appears more than once the last line wins.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.yaml
            .lines()
            .filter(|line| !line.starts_with(char::is_whitespace))
            .filter_map(|line| line.split_once(':'))
            .filter(|(k, _)| k.trim() == key)
            .map(|(_, value)| value.trim())
            .last()
            .filter(|value| !value.is_empty())
    }

    /// Resolved string value of a top-level key.
    ///
    /// Scalars (strings, numbers, booleans) are returned as strings. Falls
    /// back to [`FrontMatter::raw`] when the block does not parse as a YAML
    /// mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match serde_yaml::from_str::<serde_yaml::Mapping>(&self.yaml) {
            Ok(mapping) => mapping.get(key).and_then(scalar_to_string),
            Err(_) => self.raw(key).map(str::to_owned),
        }
    }

    /// Replace the value of `key`, or append `key: value` if absent.
    ///
    /// `raw_value` is written verbatim, so a value copied with
    /// [`FrontMatter::raw`] keeps its original quoting.
    pub fn set(&mut self, key: &str, raw_value: &str) {
        let mut offset = 0;
        let mut target = None;
        for line in self.yaml.split_inclusive('\n') {
            if let Some(value_start) = value_offset(line, key) {
                let content_len = line.trim_end_matches(['\n', '\r']).len();
                target = Some(offset + value_start..offset + content_len);
                break;
            }
            offset += line.len();
        }

        if let Some(range) = target {
            self.yaml.replace_range(range, raw_value);
        } else {
            if !self.yaml.is_empty() {
                self.yaml.push('\n');
            }
            self.yaml.push_str(key);
            self.yaml.push_str(": ");
            self.yaml.push_str(raw_value);
        }
    }

    /// Render as a fenced block.
    #[must_use]
    pub fn render(&self) -> String {
        format!("---\n{}\n---", self.yaml)
    }

    /// Write this block into `content`.
    ///
    /// Replaces the document's existing block, or prepends the block and a
    /// blank line when the document has none.
    #[must_use]
    pub fn replace_in(&self, content: &str) -> String {
        match FRONT_MATTER_RE.find(content) {
            Some(m) => {
                let mut out = String::with_capacity(content.len() + self.yaml.len());
                out.push_str(&content[..m.start()]);
                out.push_str(&self.render());
                out.push_str(&content[m.end()..]);
                out
            }
            None => format!("{}\n\n{content}", self.render()),
        }
    }
}

/// Byte offset of the value in a top-level `key: value` line.
fn value_offset(line: &str, key: &str) -> Option<usize> {
    let after_colon = line
        .strip_prefix(key)?
        .trim_start_matches([' ', '\t'])
        .strip_prefix(':')?;
    let value = after_colon.trim_start_matches([' ', '\t']);
    Some(line.len() - value.len())
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
