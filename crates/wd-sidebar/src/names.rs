//! Conversions between directory names, display labels and order keys.
//!
//! - `my-category` / `My Category` -> key `my-category`
//! - `my-category` -> label `My Category`
//! - `guides/intro/welcome.mdx` -> page identifier `guides/intro/welcome`

/// Page file extensions, longest first so `.endpoint.mdx` wins over `.mdx`.
const PAGE_SUFFIXES: &[&str] = &[".endpoint.mdx", ".mdx", ".md"];

/// Extensions the scanner accepts.
pub(crate) const PAGE_EXTENSIONS: &[&str] = &[".md", ".mdx"];

/// Key for a directory name or sidebar reference: lowercase, whitespace runs
/// replaced by `-`.
pub fn normalize_dir_or_ref(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Order map key for an identifier (category name, group name or page path).
///
/// Like [`normalize_dir_or_ref`], with the page extension and a trailing `/`
/// removed.
pub fn normalize_key(identifier: &str) -> String {
    let normalized = normalize_dir_or_ref(identifier);
    let without_ext = strip_page_extension(&normalized);
    without_ext
        .strip_suffix('/')
        .unwrap_or(without_ext)
        .to_owned()
}

/// Title-case a directory name for display: `getting-started` -> `Getting Started`.
///
/// Only first letters are touched, so `api-v2` becomes `Api V2` and an
/// already formatted `REST API` stays as is.
pub fn format_name(name: &str) -> String {
    name.replace('-', " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strip `.endpoint.mdx`, `.mdx` or `.md` from a path.
pub fn strip_page_extension(path: &str) -> &str {
    PAGE_SUFFIXES
        .iter()
        .find_map(|suffix| path.strip_suffix(suffix))
        .unwrap_or(path)
}

/// Whether a file name is a generated `.api` page variant
/// (`create-item.api.mdx`).
pub(crate) fn is_api_variant(file_name: &str) -> bool {
    strip_page_extension(file_name).to_lowercase().ends_with(".api")
}

/// Whether a file name carries one of the accepted page extensions.
pub(crate) fn has_page_extension(file_name: &str) -> bool {
    PAGE_EXTENSIONS.iter().any(|ext| file_name.ends_with(ext))
}

/// Case-insensitive sort key.
pub(crate) fn sort_key(value: &str) -> String {
    value.to_lowercase()
}
