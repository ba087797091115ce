//! Content splicing after the `</MethodEndpoint>` anchor.
//!
//! ```text
//! <MethodEndpoint …>…</MethodEndpoint>   <- kept
//!                                        <- fragment body inserted here
//! <ParamsDetails …/>…                    <- kept from the next known tag on
//! ```
//!
//! Anything between the anchor and the next known tag is what a previous
//! merge inserted, so re-merging replaces it instead of duplicating it.

use std::sync::LazyLock;

use regex::Regex;
use wd_meta::FrontMatter;

/// Splice marker.
pub const ANCHOR: &str = "</MethodEndpoint>";

/// First generated element after the endpoint block.
static NEXT_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(ParamsDetails|RequestSchema|StatusCodes|OperationTabs|TabItem|Heading)[^>]*>")
        .expect("invalid next tag regex")
});

/// Component imports the site injects itself.
static COMPONENT_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import.*?from\s+["']@site/src/components["'](\s*//\s*apiFiles import\s*)?;\n?"#)
        .expect("invalid import regex")
});

/// Fragment body to insert: front matter removed, component imports removed,
/// trimmed.
pub fn fragment_body(content: &str) -> String {
    let body = wd_meta::body(content);
    COMPONENT_IMPORT_RE.replace_all(body, "").trim().to_owned()
}

/// Insert `body` after the first anchor of `page`.
///
/// Content between the anchor and the next known tag is replaced; with no
/// next tag the remainder is dropped. Returns `None` when `page` has no
/// anchor.
pub fn splice(page: &str, body: &str) -> Option<String> {
    let anchor_end = page.find(ANCHOR)? + ANCHOR.len();
    let (head, rest) = page.split_at(anchor_end);
    let tail = NEXT_TAG_RE.find(rest).map_or("", |m| &rest[m.start()..]);
    Some(format!("{head}\n\n{body}\n\n{tail}"))
}

/// Copy `keys` from a fragment's front matter into `content`'s front matter.
///
/// Values are copied verbatim (quoting preserved). Keys the fragment lacks
/// are left alone. A document without front matter gets a new block, unless
/// there is nothing to copy.
pub fn copy_front_matter(content: &str, fragment: &FrontMatter, keys: &[&str]) -> String {
    let existing = FrontMatter::parse(content);
    let values: Vec<(&str, &str)> = keys
        .iter()
        .filter_map(|key| fragment.raw(key).map(|value| (*key, value)))
        .collect();

    if existing.is_none() && values.is_empty() {
        return content.to_owned();
    }

    let mut front_matter = existing.unwrap_or_default();
    for (key, value) in values {
        front_matter.set(key, value);
    }
    front_matter.replace_in(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_splice_before_next_tag() {
        let page = "head<MethodEndpoint>x</MethodEndpoint><ParamsDetails/>tail";

        assert_eq!(
            splice(page, "Hello").unwrap(),
            "head<MethodEndpoint>x</MethodEndpoint>\n\nHello\n\n<ParamsDetails/>tail"
        );
    }

    #[test]
    fn test_splice_replaces_previous_insert() {
        let page = "</MethodEndpoint>\n\nOld text\n\n<Heading as={\"h2\"}>Request</Heading>";

        assert_eq!(
            splice(page, "New text").unwrap(),
            "</MethodEndpoint>\n\nNew text\n\n<Heading as={\"h2\"}>Request</Heading>"
        );
    }

    #[test]
    fn test_splice_is_stable_on_repeat() {
        let page = "</MethodEndpoint>\n<StatusCodes/>";

        let once = splice(page, "Body").unwrap();
        let twice = splice(&once, "Body").unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_splice_without_next_tag_drops_remainder() {
        assert_eq!(
            splice("a</MethodEndpoint>trailing", "B").unwrap(),
            "a</MethodEndpoint>\n\nB\n\n"
        );
    }

    #[test]
    fn test_splice_missing_anchor() {
        assert!(splice("<ParamsDetails/>", "B").is_none());
    }

    #[test]
    fn test_fragment_body_strips_front_matter_and_imports() {
        let fragment = "---\nroute: GET /x\n---\nimport { Hint } from \"@site/src/components\";\nimport Other from 'other';\n\nSome **text**.\n";

        assert_eq!(
            fragment_body(fragment),
            "import Other from 'other';\n\nSome **text**."
        );
    }

    #[test]
    fn test_fragment_body_strips_tagged_import() {
        let fragment = "---\nroute: GET /x\n---\nimport { A } from '@site/src/components' // apiFiles import ;\nBody";

        assert_eq!(fragment_body(fragment), "Body");
    }

    #[test]
    fn test_fragment_body_front_matter_only_is_empty() {
        assert_eq!(fragment_body("---\nroute: GET /x\ndescription: Lists\n---"), "");
    }

    #[test]
    fn test_copy_front_matter_replaces_and_appends() {
        let page = "---\nid: list\ndescription: generated\n---\n\nbody";
        let fragment =
            FrontMatter::parse("---\nroute: GET /x\ndescription: \"Lists: items\"\nslug: /list\n---\n").unwrap();

        assert_eq!(
            copy_front_matter(page, &fragment, &["description", "slug", "title"]),
            "---\nid: list\ndescription: \"Lists: items\"\nslug: /list\n---\n\nbody"
        );
    }

    #[test]
    fn test_copy_front_matter_adds_block() {
        let fragment = FrontMatter::parse("---\nslug: /list\n---\n").unwrap();

        assert_eq!(
            copy_front_matter("body", &fragment, &["description", "slug"]),
            "---\nslug: /list\n---\n\nbody"
        );
    }

    #[test]
    fn test_copy_front_matter_nothing_to_copy() {
        let fragment = FrontMatter::parse("---\nroute: GET /x\n---\n").unwrap();

        assert_eq!(copy_front_matter("body", &fragment, &["slug"]), "body");
    }
}
