//! Binding of navbar entries to content sections.
//!
//! A direct entry `{label: "Guides", sidebarRef: "guides"}` binds to the
//! content section whose directory normalizes to `guides`. A dropdown entry
//! binds each child to a category of the parent's section:
//!
//! ```text
//! {label: "Products", dropdown: [{label: "API", sidebarRef: "api"}]}
//!   -> docs/products/api/<group>/<page>
//! ```
//!
//! The child's groups become the sidebar's categories.

use std::collections::HashSet;

use wd_config::NavbarItem;
use wd_meta::Diagnostics;

use crate::names::{normalize_dir_or_ref, sort_key};
use crate::structure::{ContentNode, ContentSection, ContentTree};

/// Content bound to one sidebar reference.
#[derive(Debug, Clone, Copy)]
pub enum BoundContent<'a> {
    /// Whole section, categories taken as is.
    Section(&'a ContentSection),
    /// One category of a dropdown's parent section.
    DropdownChild(&'a ContentNode),
}

/// A sidebar reference with its content.
#[derive(Debug, Clone, Copy)]
pub struct Binding<'a> {
    /// `sidebarRef` as written in the navbar.
    pub sidebar_ref: &'a str,
    pub content: BoundContent<'a>,
}

/// Bind every `sidebarRef` in navbar order.
///
/// Direct entries come in navbar position order; dropdown children take the
/// dropdown's position, in dropdown order. A reference seen twice is bound
/// once. References without content are reported and left out.
pub fn bind<'a>(navbar: &'a [NavbarItem], tree: &'a ContentTree) -> (Vec<Binding<'a>>, Diagnostics) {
    let mut bindings = Vec::new();
    let mut diagnostics = Diagnostics::new();
    let mut seen = HashSet::new();

    for item in navbar {
        if let Some(sidebar_ref) = item.sidebar_ref.as_deref() {
            if !seen.insert(sidebar_ref.to_lowercase()) {
                diagnostics.info(format!("Duplicate sidebarRef '{sidebar_ref}' ignored."));
                continue;
            }
            let key = normalize_dir_or_ref(&item.label);
            match tree.section(&key) {
                Some(section) => bindings.push(Binding {
                    sidebar_ref,
                    content: BoundContent::Section(section),
                }),
                None => diagnostics.warn(format!(
                    "Content directory '{key}' (derived from label '{}') for sidebarRef '{sidebar_ref}' not found. Skipping content.",
                    item.label
                )),
            }
        } else if let Some(children) = &item.dropdown {
            let parent_key = normalize_dir_or_ref(&item.label);
            let parent = tree.section(&parent_key);
            for child in children {
                let Some(sidebar_ref) = child.sidebar_ref.as_deref() else {
                    continue;
                };
                if !seen.insert(sidebar_ref.to_lowercase()) {
                    diagnostics.info(format!("Duplicate sidebarRef '{sidebar_ref}' ignored."));
                    continue;
                }
                let Some(parent) = parent else {
                    diagnostics.warn(format!(
                        "Parent content directory '{parent_key}' for dropdown sidebarRef '{sidebar_ref}' not found. Skipping content."
                    ));
                    continue;
                };
                match parent.category(&child.label) {
                    Some(category) => bindings.push(Binding {
                        sidebar_ref,
                        content: BoundContent::DropdownChild(category),
                    }),
                    None => diagnostics.warn(format!(
                        "Could not find sub-directory '{}' (from label '{}') within '{parent_key}' for dropdown sidebarRef '{sidebar_ref}'. Skipping content.",
                        normalize_dir_or_ref(&child.label),
                        child.label
                    )),
                }
            }
        }
    }

    (bindings, diagnostics)
}

/// Report sections that no navbar entry refers to.
///
/// A section is referenced by a direct entry's label or a dropdown's label.
pub fn report_orphans(navbar: &[NavbarItem], tree: &ContentTree) -> Diagnostics {
    let referenced: HashSet<String> = navbar
        .iter()
        .filter(|item| item.sidebar_ref.is_some() || item.dropdown.is_some())
        .map(|item| normalize_dir_or_ref(&item.label))
        .collect();

    let mut diagnostics = Diagnostics::new();
    for section in tree.sections() {
        if !referenced.contains(&section.key) {
            diagnostics.warn(format!(
                "Directory '{}' found in content but is not referenced by any navbar item: orphaned content directory. Skipping content.",
                section.name
            ));
        }
    }
    diagnostics
}

/// Navbar synthesized from the content sections, sorted by label.
pub fn bootstrap_navbar(tree: &ContentTree) -> Vec<NavbarItem> {
    let mut items: Vec<NavbarItem> = tree
        .sections()
        .iter()
        .map(|section| NavbarItem::direct(section.name.clone(), normalize_dir_or_ref(&section.name)))
        .collect();
    items.sort_by_key(|item| sort_key(&item.label));
    items
}
