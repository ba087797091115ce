//! Section tree built from scanned page paths.
//!
//! ```text
//! guides/intro/welcome.mdx
//! ^^^^^^ ^^^^^ ^^^^^^^^^^^
//! section  |   page
//!       category
//! ```
//!
//! Directories between the category and the file become nested groups. A
//! page lying directly in a section directory is its own category.
//! Names are matched case-insensitively (via [`normalize_dir_or_ref`]); the
//! first casing seen is kept.

use wd_meta::Diagnostics;

use crate::names::{normalize_dir_or_ref, strip_page_extension};

/// One directory level below a section: a category or a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentNode {
    /// Directory name as found on disk.
    pub name: String,
    /// Root-relative page paths, extension included, in scan order.
    pub pages: Vec<String>,
    /// Nested groups in scan order.
    pub groups: Vec<ContentNode>,
    /// Landing page: stem `index` or equal to the directory name.
    pub special_page: Option<String>,
}

impl ContentNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Nested group by name (case-insensitive).
    pub fn group(&self, name: &str) -> Option<&ContentNode> {
        let key = normalize_dir_or_ref(name);
        self.groups
            .iter()
            .find(|group| normalize_dir_or_ref(&group.name) == key)
    }

    fn group_or_insert(&mut self, name: &str) -> &mut ContentNode {
        let key = normalize_dir_or_ref(name);
        let index = match self
            .groups
            .iter()
            .position(|group| normalize_dir_or_ref(&group.name) == key)
        {
            Some(index) => index,
            None => {
                self.groups.push(ContentNode::new(name));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index]
    }

    fn add_page(&mut self, path: &str) {
        if !self.pages.iter().any(|page| page == path) {
            self.pages.push(path.to_owned());
        }
    }
}

/// Top-level content directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSection {
    /// Normalized directory name.
    pub key: String,
    /// First casing seen on disk.
    pub name: String,
    pub categories: Vec<ContentNode>,
}

impl ContentSection {
    /// Category by name (case-insensitive).
    pub fn category(&self, name: &str) -> Option<&ContentNode> {
        let key = normalize_dir_or_ref(name);
        self.categories
            .iter()
            .find(|category| normalize_dir_or_ref(&category.name) == key)
    }
}

/// All sections found under the content roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTree {
    sections: Vec<ContentSection>,
}

impl ContentTree {
    /// Fold scanned page paths into sections, categories and groups.
    ///
    /// Paths with a single segment are reported and skipped. A page directly
    /// under a section (`guides/overview.mdx`) becomes the only page of a
    /// category named after its stem.
    pub fn build<S: AsRef<str>>(files: &[S]) -> (Self, Diagnostics) {
        let mut tree = Self::default();
        let mut diagnostics = Diagnostics::new();
        for file in files {
            tree.insert(file.as_ref(), &mut diagnostics);
        }
        (tree, diagnostics)
    }

    fn insert(&mut self, raw_path: &str, diagnostics: &mut Diagnostics) {
        let page_path = raw_path.replace('\\', "/");
        let parts: Vec<&str> = page_path.split('/').filter(|p| !p.is_empty()).collect();

        if parts.len() < 2 {
            diagnostics.warn(format!(
                "Skipping page '{raw_path}': needs at least <sidebar>/<category>/... structure"
            ));
            return;
        }

        let section_name = parts[0];
        let file_name = parts[parts.len() - 1];
        let page_path = parts.join("/");

        let section = self.section_or_insert(section_name);
        if parts.len() == 2 {
            // A page at the top of a section forms a category of its own
            let category = section_category_or_insert(section, strip_page_extension(file_name));
            category.add_page(&page_path);
            return;
        }

        let category_name = parts[1];
        let group_names = &parts[2..parts.len() - 1];
        let mut node = section_category_or_insert(section, category_name);
        for group_name in group_names {
            node = node.group_or_insert(group_name);
        }

        let parent_dir = group_names.last().copied().unwrap_or(category_name);
        let stem = strip_page_extension(file_name);
        let is_landing = stem.eq_ignore_ascii_case("index")
            || stem.to_lowercase() == parent_dir.to_lowercase();

        if is_landing {
            match &node.special_page {
                None => node.special_page = Some(page_path),
                Some(existing) if *existing == page_path => {}
                Some(existing) => {
                    diagnostics.info(format!(
                        "'{page_path}' listed as a regular page: '{existing}' is already the landing page"
                    ));
                    node.add_page(&page_path);
                }
            }
        } else {
            node.add_page(&page_path);
        }
    }

    fn section_or_insert(&mut self, name: &str) -> &mut ContentSection {
        let key = normalize_dir_or_ref(name);
        let index = match self.sections.iter().position(|s| s.key == key) {
            Some(index) => index,
            None => {
                self.sections.push(ContentSection {
                    key,
                    name: name.to_owned(),
                    categories: Vec::new(),
                });
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }

    /// Section by normalized key.
    pub fn section(&self, key: &str) -> Option<&ContentSection> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// Sections in first-seen order.
    pub fn sections(&self) -> &[ContentSection] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

fn section_category_or_insert<'a>(
    section: &'a mut ContentSection,
    name: &str,
) -> &'a mut ContentNode {
    let key = normalize_dir_or_ref(name);
    let index = match section
        .categories
        .iter()
        .position(|category| normalize_dir_or_ref(&category.name) == key)
    {
        Some(index) => index,
        None => {
            section.categories.push(ContentNode::new(name));
            section.categories.len() - 1
        }
    };
    &mut section.categories[index]
}
