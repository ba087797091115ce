//! Order-preserving merge of a content tree against recorded order.
//!
//! For every node the recorded identifiers are replayed first: items still on
//! disk are emitted in recorded order, stale ones produce a warning. Whatever
//! is left is appended case-insensitively sorted, pages before groups. Nodes
//! that end up empty are dropped.

use std::collections::HashSet;

use wd_config::{Category, Group, SidebarItem};
use wd_meta::Diagnostics;

use crate::names::{format_name, normalize_key, sort_key, strip_page_extension};
use crate::order::{OrderMap, child_key};
use crate::structure::ContentNode;

/// How a page path is turned into its sidebar identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PathRewrite {
    /// `guides/intro/welcome.mdx` -> `guides/intro/welcome`
    Keep,
    /// `products/api/auth/login.mdx` -> `api/auth/login`
    DropFirstSegment,
}

impl PathRewrite {
    pub(crate) fn page_id(self, page_path: &str) -> String {
        let without_ext = strip_page_extension(page_path);
        match self {
            Self::Keep => without_ext.to_owned(),
            Self::DropFirstSegment => without_ext
                .split_once('/')
                .map_or(without_ext, |(_, rest)| rest)
                .to_owned(),
        }
    }
}

/// Merger state for one sidebar section.
pub(crate) struct Merger<'a> {
    order: &'a OrderMap,
    rewrite: PathRewrite,
    diagnostics: Diagnostics,
}

impl<'a> Merger<'a> {
    pub(crate) fn new(order: &'a OrderMap, rewrite: PathRewrite) -> Self {
        Self {
            order,
            rewrite,
            diagnostics: Diagnostics::new(),
        }
    }

    pub(crate) fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    /// Merge a list of nodes as the categories of the section at `section_key`.
    pub(crate) fn merge_categories(
        &mut self,
        nodes: &[&ContentNode],
        section_key: &str,
    ) -> Vec<Category> {
        let order = self.order;
        let mut remaining: Vec<&ContentNode> = nodes.to_vec();
        let mut consumed = HashSet::new();
        let mut categories = Vec::new();

        for recorded in order.get(section_key) {
            let key = normalize_key(recorded);
            if let Some(index) = remaining.iter().position(|n| normalize_key(&n.name) == key) {
                let node = remaining.remove(index);
                if let Some(category) = self.merge_category(node, section_key, recorded.clone()) {
                    categories.push(category);
                }
                consumed.insert(key);
            } else if !consumed.contains(&key) {
                self.diagnostics.warn(format!(
                    "Category '{recorded}' found in config order for '{section_key}' but not on filesystem. Skipping."
                ));
            }
        }

        remaining.sort_by_key(|n| sort_key(&n.name));
        for node in remaining {
            if let Some(category) = self.merge_category(node, section_key, format_name(&node.name)) {
                self.diagnostics.info(format!(
                    "Adding new category '{}' found on filesystem to sidebar '{section_key}'.",
                    node.name
                ));
                categories.push(category);
            }
        }

        categories
    }

    fn merge_category(
        &mut self,
        node: &ContentNode,
        section_key: &str,
        category_name: String,
    ) -> Option<Category> {
        let key = child_key(section_key, &node.name);
        if let Some(landing) = &node.special_page {
            self.diagnostics.warn(format!(
                "Landing page '{landing}' of category '{category_name}' has no place in the sidebar. Skipping."
            ));
        }
        let pages = self.merge_items(node, &key);
        (!pages.is_empty()).then_some(Category {
            category_name,
            pages,
        })
    }

    /// Merge the pages and groups of `node` against the order at `key`.
    pub(crate) fn merge_items(&mut self, node: &ContentNode, key: &str) -> Vec<SidebarItem> {
        let mut pages: Vec<(String, String)> = node
            .pages
            .iter()
            .map(|path| {
                let id = self.rewrite.page_id(path);
                (normalize_key(&id), id)
            })
            .collect();
        let mut groups: Vec<&ContentNode> = node.groups.iter().collect();
        let landing_key = node
            .special_page
            .as_deref()
            .map(|path| normalize_key(&self.rewrite.page_id(path)));

        let order = self.order;
        let mut consumed = HashSet::new();
        let mut items = Vec::new();

        for recorded in order.get(key) {
            let recorded_key = normalize_key(recorded);
            if let Some(index) = pages.iter().position(|(k, _)| *k == recorded_key) {
                let (_, id) = pages.remove(index);
                items.push(SidebarItem::Page(id));
            } else if let Some(index) =
                groups.iter().position(|g| normalize_key(&g.name) == recorded_key)
            {
                let group = groups.remove(index);
                if let Some(merged) = self.merge_group(group, key, recorded.clone()) {
                    items.push(SidebarItem::Group(merged));
                }
            } else if landing_key.as_deref() != Some(recorded_key.as_str())
                && !consumed.contains(&recorded_key)
            {
                self.diagnostics.warn(format!(
                    "Item '{recorded}' found in config order for '{key}' but not on filesystem. Skipping."
                ));
            }
            consumed.insert(recorded_key);
        }

        pages.sort_by_key(|(_, id)| sort_key(id));
        for (_, id) in pages {
            self.diagnostics.info(format!(
                "Adding new page '{id}' found on filesystem to '{key}'."
            ));
            items.push(SidebarItem::Page(id));
        }

        groups.sort_by_key(|g| sort_key(&g.name));
        for group in groups {
            if let Some(merged) = self.merge_group(group, key, format_name(&group.name)) {
                self.diagnostics.info(format!(
                    "Adding new group '{}' found on filesystem to '{key}'.",
                    group.name
                ));
                items.push(SidebarItem::Group(merged));
            }
        }

        items
    }

    fn merge_group(
        &mut self,
        node: &ContentNode,
        parent_key: &str,
        group_name: String,
    ) -> Option<Group> {
        let key = child_key(parent_key, &node.name);
        let subpages = self.merge_items(node, &key);
        let page = node
            .special_page
            .as_deref()
            .map(|path| self.rewrite.page_id(path));

        if subpages.is_empty() && page.is_none() {
            return None;
        }
        Some(Group {
            group_name,
            subpages,
            page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn page(id: &str) -> SidebarItem {
        SidebarItem::Page(id.to_owned())
    }

    fn node(name: &str, pages: &[&str]) -> ContentNode {
        ContentNode {
            pages: pages.iter().map(|p| (*p).to_owned()).collect(),
            ..ContentNode::new(name)
        }
    }

    fn order(pages: &[&str]) -> OrderMap {
        OrderMap::from_sidebars(Some(&json!([{
            "sidebarRef": "s",
            "categories": [{ "categoryName": "C", "pages": pages }]
        }])))
    }

    #[test]
    fn test_recorded_order_wins() {
        let order = order(&["s/c/b", "s/c/a", "s/c/c"]);
        let category = node("c", &["s/c/a.mdx", "s/c/b.mdx", "s/c/c.mdx"]);
        let mut merger = Merger::new(&order, PathRewrite::Keep);

        let items = merger.merge_items(&category, "s/c");

        assert_eq!(items, [page("s/c/b"), page("s/c/a"), page("s/c/c")]);
        assert!(merger.into_diagnostics().is_empty());
    }

    #[test]
    fn test_new_items_appended() {
        let order = order(&["s/c/b", "s/c/a", "s/c/c"]);
        let category = node("c", &["s/c/a.mdx", "s/c/d.mdx", "s/c/b.mdx", "s/c/c.mdx"]);
        let mut merger = Merger::new(&order, PathRewrite::Keep);

        let items = merger.merge_items(&category, "s/c");

        assert_eq!(
            items,
            [page("s/c/b"), page("s/c/a"), page("s/c/c"), page("s/c/d")]
        );
        let diagnostics = merger.into_diagnostics();
        assert_eq!(diagnostics.warning_count(), 0);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_stale_items_dropped_with_warning() {
        let order = order(&["s/c/b", "s/c/a", "s/c/c"]);
        let category = node("c", &["s/c/a.mdx", "s/c/c.mdx"]);
        let mut merger = Merger::new(&order, PathRewrite::Keep);

        let items = merger.merge_items(&category, "s/c");

        assert_eq!(items, [page("s/c/a"), page("s/c/c")]);
        let diagnostics = merger.into_diagnostics();
        assert_eq!(diagnostics.warning_count(), 1);
        assert!(diagnostics.has_warning_containing("'s/c/b'"));
    }

    #[test]
    fn test_pages_before_groups_sorted_case_insensitive() {
        let order = OrderMap::default();
        let mut category = node("c", &["s/c/Zeta.mdx", "s/c/alpha.mdx"]);
        category.groups.push(node("beta", &["s/c/beta/x.mdx"]));
        category.groups.push(node("Alpha-Group", &["s/c/Alpha-Group/y.mdx"]));
        let mut merger = Merger::new(&order, PathRewrite::Keep);

        let items = merger.merge_items(&category, "s/c");

        assert_eq!(
            items,
            [
                page("s/c/alpha"),
                page("s/c/Zeta"),
                SidebarItem::Group(Group {
                    group_name: "Alpha Group".to_owned(),
                    subpages: vec![page("s/c/Alpha-Group/y")],
                    page: None,
                }),
                SidebarItem::Group(Group {
                    group_name: "Beta".to_owned(),
                    subpages: vec![page("s/c/beta/x")],
                    page: None,
                }),
            ]
        );
    }

    #[test]
    fn test_recorded_group_name_casing_kept() {
        let order = OrderMap::from_sidebars(Some(&json!([{
            "sidebarRef": "s",
            "categories": [{
                "categoryName": "C",
                "pages": [{ "groupName": "API keys", "subpages": ["s/c/api-keys/rotate"] }]
            }]
        }])));
        let mut category = node("c", &[]);
        category.groups.push(node("api-keys", &["s/c/api-keys/rotate.mdx"]));
        let mut merger = Merger::new(&order, PathRewrite::Keep);

        let items = merger.merge_items(&category, "s/c");

        assert_eq!(
            items,
            [SidebarItem::Group(Group {
                group_name: "API keys".to_owned(),
                subpages: vec![page("s/c/api-keys/rotate")],
                page: None,
            })]
        );
    }

    #[test]
    fn test_group_landing_page_is_not_stale() {
        let order = OrderMap::from_sidebars(Some(&json!([{
            "sidebarRef": "s",
            "categories": [{
                "categoryName": "C",
                "pages": [{
                    "groupName": "Setup",
                    "subpages": ["s/c/setup/install"],
                    "page": "s/c/setup/setup"
                }]
            }]
        }])));
        let mut category = node("c", &[]);
        let mut setup = node("setup", &["s/c/setup/install.mdx"]);
        setup.special_page = Some("s/c/setup/setup.mdx".to_owned());
        category.groups.push(setup);
        let mut merger = Merger::new(&order, PathRewrite::Keep);

        let items = merger.merge_items(&category, "s/c");

        assert_eq!(
            items,
            [SidebarItem::Group(Group {
                group_name: "Setup".to_owned(),
                subpages: vec![page("s/c/setup/install")],
                page: Some("s/c/setup/setup".to_owned()),
            })]
        );
        assert!(merger.into_diagnostics().is_empty());
    }

    #[test]
    fn test_empty_group_dropped() {
        let order = OrderMap::default();
        let mut category = node("c", &["s/c/a.mdx"]);
        category.groups.push(node("empty", &[]));
        let mut merger = Merger::new(&order, PathRewrite::Keep);

        let items = merger.merge_items(&category, "s/c");

        assert_eq!(items, [page("s/c/a")]);
    }

    #[test]
    fn test_fully_stale_category_omitted() {
        let order = order(&["s/c/gone"]);
        let nodes = [node("c", &[]), node("d", &["s/d/x.mdx"])];
        let refs: Vec<&ContentNode> = nodes.iter().collect();
        let mut merger = Merger::new(&order, PathRewrite::Keep);

        let categories = merger.merge_categories(&refs, "s");

        assert_eq!(
            categories,
            [Category {
                category_name: "D".to_owned(),
                pages: vec![page("s/d/x")],
            }]
        );
    }

    #[test]
    fn test_stale_category_warns() {
        let order = order(&["s/c/a"]);
        let nodes = [node("other", &["s/other/a.mdx"])];
        let refs: Vec<&ContentNode> = nodes.iter().collect();
        let mut merger = Merger::new(&order, PathRewrite::Keep);

        merger.merge_categories(&refs, "s");

        assert!(merger.into_diagnostics().has_warning_containing("Category 'C'"));
    }

    #[test]
    fn test_drop_first_segment_rewrite() {
        assert_eq!(
            PathRewrite::DropFirstSegment.page_id("products/api/auth/login.mdx"),
            "api/auth/login"
        );
        assert_eq!(
            PathRewrite::Keep.page_id("products/api/auth/login.endpoint.mdx"),
            "products/api/auth/login"
        );
    }
}
