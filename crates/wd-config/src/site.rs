//! Site configuration (`config.json`) model.
//!
//! The file carries many keys this workspace never touches (branding,
//! plan flags, API file lists...). [`SiteConfig`] therefore keeps the whole
//! document as an order-preserving JSON object and exposes typed views of the
//! two keys it owns:
//!
//! - `navbar`: ordered [`NavbarItem`] list, nested one level via `dropdown`
//! - `sidebars`: persisted [`SidebarSection`] list
//!
//! Serialization goes through [`SiteConfig::to_pretty_json`], which produces
//! the canonical 2-space form. Comparing two canonical strings is how callers
//! decide whether the file needs rewriting.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ConfigError;

/// Navigation entry.
///
/// Unknown keys (icons, external flags...) are kept in `extra` so that a
/// navbar read and written back is unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavbarItem {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropdown: Option<Vec<NavbarItem>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NavbarItem {
    /// Create a navbar entry bound directly to a sidebar.
    #[must_use]
    pub fn direct(label: impl Into<String>, sidebar_ref: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sidebar_ref: Some(sidebar_ref.into()),
            ..Self::default()
        }
    }

    /// Create a dropdown entry.
    #[must_use]
    pub fn dropdown(label: impl Into<String>, children: Vec<NavbarItem>) -> Self {
        Self {
            label: label.into(),
            dropdown: Some(children),
            ..Self::default()
        }
    }

    /// Parse one entry field by field.
    ///
    /// A known field with an unexpected type is kept verbatim in `extra` and
    /// noted in `problems`; the other fields still apply. Returns `None` when
    /// the entry is not an object.
    pub fn from_value(value: &Value, problems: &mut Vec<String>) -> Option<Self> {
        let object = value.as_object()?;
        let mut item = Self::default();
        let mut malformed = Vec::new();

        for (key, field) in object {
            match (key.as_str(), field) {
                ("label", Value::String(label)) => item.label.clone_from(label),
                ("sidebarRef", Value::String(sidebar_ref)) => {
                    item.sidebar_ref = Some(sidebar_ref.clone());
                }
                ("link", Value::String(link)) => item.link = Some(link.clone()),
                ("dropdown", Value::Array(children)) => {
                    item.dropdown = Some(parse_entries(children, problems));
                }
                ("label" | "sidebarRef" | "link" | "dropdown", _) => {
                    malformed.push(key.as_str());
                    item.extra.insert(key.clone(), field.clone());
                }
                _ => {
                    item.extra.insert(key.clone(), field.clone());
                }
            }
        }

        for key in malformed {
            problems.push(format!(
                "Navbar item '{}' has a malformed '{key}' field. Ignoring the field.",
                item.label
            ));
        }
        Some(item)
    }
}

/// Parse navbar entries, skipping (and noting) those that are not objects.
fn parse_entries(values: &[Value], problems: &mut Vec<String>) -> Vec<NavbarItem> {
    values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let item = NavbarItem::from_value(value, problems);
            if item.is_none() {
                problems.push(format!(
                    "Navbar item #{} is not an object. Skipping it.",
                    index + 1
                ));
            }
            item
        })
        .collect()
}

/// One entry inside a category or group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarItem {
    /// Page identifier (extension-less path).
    Page(String),
    /// Nested group.
    Group(Group),
}

/// Named, nestable group of pages with an optional landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_name: String,
    #[serde(default)]
    pub subpages: Vec<SidebarItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

/// Second-level grouping within a sidebar section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_name: String,
    #[serde(default)]
    pub pages: Vec<SidebarItem>,
}

/// Top-level sidebar bound to one navigation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarSection {
    pub sidebar_ref: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl SidebarSection {
    /// First page of the first category.
    ///
    /// A group contributes its landing page before its subpages. Returns
    /// `None` when the first category holds no page at any depth.
    #[must_use]
    pub fn first_page(&self) -> Option<&str> {
        self.categories
            .first()
            .and_then(|category| category.pages.first())
            .and_then(SidebarItem::first_page)
    }
}

impl SidebarItem {
    /// First page reachable from this item.
    #[must_use]
    pub fn first_page(&self) -> Option<&str> {
        match self {
            Self::Page(path) => Some(path),
            Self::Group(group) => group
                .page
                .as_deref()
                .or_else(|| group.subpages.iter().find_map(SidebarItem::first_page)),
        }
    }
}

/// Parsed `config.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    root: Map<String, Value>,
}

impl SiteConfig {
    /// Load the site configuration from disk.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the file is missing, `Json` if it is not valid
    /// JSON and `Validation` if the top level is not an object.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_value(value)
    }

    /// Build from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the value is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(ConfigError::Validation(
                "site configuration must be a JSON object".to_owned(),
            )),
        }
    }

    /// Whether the `navbar` array holds at least one entry, well-formed or not.
    #[must_use]
    pub fn has_navbar(&self) -> bool {
        self.root
            .get("navbar")
            .and_then(Value::as_array)
            .is_some_and(|navbar| !navbar.is_empty())
    }

    /// Typed navbar entries, parsed leniently (see [`NavbarItem::from_value`]).
    ///
    /// Returns the entries and a message for every entry or field that could
    /// not be used.
    #[must_use]
    pub fn navbar(&self) -> (Vec<NavbarItem>, Vec<String>) {
        let mut problems = Vec::new();
        let items = self
            .root
            .get("navbar")
            .and_then(Value::as_array)
            .map(|entries| parse_entries(entries, &mut problems))
            .unwrap_or_default();
        (items, problems)
    }

    /// Raw value of a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Whether any sidebar is currently persisted.
    #[must_use]
    pub fn has_sidebars(&self) -> bool {
        self.root
            .get("sidebars")
            .and_then(Value::as_array)
            .is_some_and(|sidebars| !sidebars.is_empty())
    }

    /// Replace the `navbar` key, keeping its position if it already exists.
    pub fn set_navbar(&mut self, navbar: &[NavbarItem]) -> Result<(), ConfigError> {
        let value = serde_json::to_value(navbar).map_err(ConfigError::Serialize)?;
        self.root.insert("navbar".to_owned(), value);
        Ok(())
    }

    /// Replace the `sidebars` key, keeping its position if it already exists.
    pub fn set_sidebars(&mut self, sidebars: &[SidebarSection]) -> Result<(), ConfigError> {
        let value = serde_json::to_value(sidebars).map_err(ConfigError::Serialize)?;
        self.root.insert("sidebars".to_owned(), value);
        Ok(())
    }

    /// Canonical serialization: 2-space indented JSON, original key order.
    pub fn to_pretty_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(&self.root).map_err(ConfigError::Serialize)
    }
}

impl std::str::FromStr for SiteConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s).map_err(|source| ConfigError::Json {
            path: "<inline>".into(),
            source,
        })?;
        Self::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn config(value: Value) -> SiteConfig {
        SiteConfig::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_sidebars_with_groups() {
        let sidebars: Vec<SidebarSection> = serde_json::from_value(json!([{
            "sidebarRef": "guides",
            "categories": [{
                "categoryName": "Basics",
                "pages": [
                    "guides/basics/intro",
                    {"groupName": "Templates", "page": "guides/basics/templates/templates", "subpages": ["guides/basics/templates/env"]}
                ]
            }]
        }]))
        .unwrap();

        assert_eq!(sidebars.len(), 1);
        let pages = &sidebars[0].categories[0].pages;
        assert_eq!(pages[0], SidebarItem::Page("guides/basics/intro".to_owned()));
        let SidebarItem::Group(group) = &pages[1] else {
            panic!("expected group");
        };
        assert_eq!(group.group_name, "Templates");
        assert_eq!(group.page.as_deref(), Some("guides/basics/templates/templates"));
        assert_eq!(group.subpages.len(), 1);
    }

    #[test]
    fn test_navbar_keeps_unknown_keys() {
        let config = config(json!({
            "navbar": [{"label": "Guides", "sidebarRef": "guides", "icon": "book"}]
        }));
        let (navbar, problems) = config.navbar();
        assert!(problems.is_empty());
        assert_eq!(navbar[0].sidebar_ref.as_deref(), Some("guides"));
        assert_eq!(navbar[0].extra.get("icon"), Some(&json!("book")));

        let back = serde_json::to_value(&navbar[0]).unwrap();
        assert_eq!(back, json!({"label": "Guides", "sidebarRef": "guides", "icon": "book"}));
    }

    #[test]
    fn test_navbar_dropdown() {
        let config = config(json!({
            "navbar": [{"label": "Products", "dropdown": [{"label": "Alpha", "sidebarRef": "alpha"}]}]
        }));
        let (navbar, _) = config.navbar();
        let dropdown = navbar[0].dropdown.as_ref().unwrap();
        assert_eq!(dropdown[0].label, "Alpha");
        assert!(config.has_navbar());
    }

    #[test]
    fn test_navbar_malformed_field_keeps_entry() {
        let config = config(json!({
            "navbar": [{"label": "Guides", "sidebarRef": "guides", "link": {"href": "/guides"}}]
        }));

        let (navbar, problems) = config.navbar();

        assert_eq!(navbar.len(), 1);
        assert_eq!(navbar[0].label, "Guides");
        assert_eq!(navbar[0].sidebar_ref.as_deref(), Some("guides"));
        assert!(navbar[0].link.is_none());
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("'link'"));

        let back = serde_json::to_value(&navbar[0]).unwrap();
        assert_eq!(
            back,
            json!({"label": "Guides", "sidebarRef": "guides", "link": {"href": "/guides"}})
        );
    }

    #[test]
    fn test_navbar_non_object_entries_skipped() {
        let config = config(json!({
            "navbar": [
                "Guides",
                {"label": "Products", "dropdown": [42, {"label": "API", "sidebarRef": "api"}]}
            ]
        }));

        let (navbar, problems) = config.navbar();

        assert_eq!(navbar.len(), 1);
        assert_eq!(navbar[0].dropdown.as_ref().unwrap().len(), 1);
        assert_eq!(problems.len(), 2);
        assert!(config.has_navbar());
    }

    #[test]
    fn test_has_navbar_counts_raw_entries() {
        assert!(!config(json!({"navbar": []})).has_navbar());
        assert!(!config(json!({"navbar": {"label": "x"}})).has_navbar());
        assert!(config(json!({"navbar": [null]})).has_navbar());
    }

    #[test]
    fn test_missing_keys() {
        let config = config(json!({"name": "site"}));
        assert!(!config.has_navbar());
        assert!(!config.has_sidebars());
        assert!(config.navbar().0.is_empty());
    }

    #[test]
    fn test_set_sidebars_preserves_key_order() {
        let mut config: SiteConfig = r#"{"name": "x", "sidebars": [], "theme": "dark"}"#
            .parse()
            .unwrap();
        config
            .set_sidebars(&[SidebarSection {
                sidebar_ref: "guides".to_owned(),
                categories: vec![],
            }])
            .unwrap();

        let json = config.to_pretty_json().unwrap();
        let name = json.find("\"name\"").unwrap();
        let sidebars = json.find("\"sidebars\"").unwrap();
        let theme = json.find("\"theme\"").unwrap();
        assert!(name < sidebars && sidebars < theme);
    }

    #[test]
    fn test_group_serialization_shape() {
        let group = SidebarItem::Group(Group {
            group_name: "Setup".to_owned(),
            subpages: vec![SidebarItem::Page("a/b/setup/one".to_owned())],
            page: None,
        });
        assert_eq!(
            serde_json::to_string(&group).unwrap(),
            r#"{"groupName":"Setup","subpages":["a/b/setup/one"]}"#
        );
    }

    #[test]
    fn test_pretty_json_uses_two_spaces() {
        let config = config(json!({"a": [1]}));
        assert_eq!(config.to_pretty_json().unwrap(), "{\n  \"a\": [\n    1\n  ]\n}");
    }

    #[test]
    fn test_first_page_descends_into_group() {
        let section = SidebarSection {
            sidebar_ref: "guides".to_owned(),
            categories: vec![Category {
                category_name: "Start".to_owned(),
                pages: vec![SidebarItem::Group(Group {
                    group_name: "Setup".to_owned(),
                    subpages: vec![SidebarItem::Page("guides/start/setup/install".to_owned())],
                    page: None,
                })],
            }],
        };
        assert_eq!(section.first_page(), Some("guides/start/setup/install"));
    }

    #[test]
    fn test_first_page_prefers_group_landing_page() {
        let item = SidebarItem::Group(Group {
            group_name: "Setup".to_owned(),
            subpages: vec![SidebarItem::Page("x/install".to_owned())],
            page: Some("x/setup".to_owned()),
        });
        assert_eq!(item.first_page(), Some("x/setup"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SiteConfig::load(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = SiteConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = "[1, 2]".parse::<SiteConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
