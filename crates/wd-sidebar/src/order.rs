//! Recorded ordering extracted from the previous `sidebars`.
//!
//! Keys are normalized tree paths:
//!
//! - `guides` -> category names of sidebar `guides`
//! - `guides/getting-started` -> items of category `Getting Started`
//! - `guides/getting-started/advanced` -> group `page` (if any), then its items
//!
//! Values are identifiers exactly as persisted (page paths, group names,
//! category names) so recorded casing survives a rebuild.

use std::collections::HashMap;

use serde_json::Value;

use crate::names::normalize_key;

/// Previously persisted child order for every tree path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderMap {
    entries: HashMap<String, Vec<String>>,
}

impl OrderMap {
    /// Build from the raw `sidebars` value.
    ///
    /// Anything that is not an array yields an empty map. Sections without a
    /// `sidebarRef`, categories without a `categoryName` and groups without a
    /// `groupName` are skipped.
    pub fn from_sidebars(sidebars: Option<&Value>) -> Self {
        let mut map = Self::default();
        let Some(sidebars) = sidebars.and_then(Value::as_array) else {
            return map;
        };

        for sidebar in sidebars {
            let Some(sidebar_ref) = sidebar.get("sidebarRef").and_then(Value::as_str) else {
                continue;
            };
            let Some(categories) = sidebar.get("categories").and_then(Value::as_array) else {
                continue;
            };

            let sidebar_key = normalize_key(sidebar_ref);
            let mut category_names = Vec::new();
            for category in categories {
                let Some(name) = category.get("categoryName").and_then(Value::as_str) else {
                    continue;
                };
                category_names.push(name.to_owned());

                let category_key = child_key(&sidebar_key, name);
                let mut items = Vec::new();
                if let Some(pages) = category.get("pages").and_then(Value::as_array) {
                    map.record_items(pages, &category_key, &mut items);
                }
                map.entries.insert(category_key, items);
            }
            map.entries.insert(sidebar_key, category_names);
        }
        map
    }

    fn record_items(&mut self, items: &[Value], parent_key: &str, order: &mut Vec<String>) {
        for item in items {
            match item {
                Value::String(page) => order.push(page.clone()),
                Value::Object(group) => {
                    let Some(name) = group.get("groupName").and_then(Value::as_str) else {
                        continue;
                    };
                    order.push(name.to_owned());

                    let group_key = child_key(parent_key, name);
                    let mut group_order = Vec::new();
                    if let Some(page) = group.get("page").and_then(Value::as_str) {
                        group_order.push(page.to_owned());
                    }
                    if let Some(subpages) = group.get("subpages").and_then(Value::as_array) {
                        self.record_items(subpages, &group_key, &mut group_order);
                    }
                    self.entries.insert(group_key, group_order);
                }
                _ => {}
            }
        }
    }

    /// Recorded order for a key (empty when nothing was recorded).
    pub fn get(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Key of a child below `parent_key`.
pub(crate) fn child_key(parent_key: &str, name: &str) -> String {
    format!("{parent_key}/{}", normalize_key(name))
}
