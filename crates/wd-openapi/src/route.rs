//! HTTP routes of endpoint fragments and generated pages.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static METHOD_ENDPOINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<MethodEndpoint\s+([^>]+)>").expect("invalid MethodEndpoint regex")
});

static METHOD_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)method=\{"([^"]+)"\}"#).expect("invalid method regex"));

static PATH_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"path=\{"([^"]+)"\}"#).expect("invalid path regex"));

/// HTTP method (lowercased) and path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub method: String,
    pub path: String,
}

impl Route {
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            method: method.to_lowercase(),
            path: path.to_owned(),
        }
    }

    /// Parse a fragment `route` value: `POST /items/{id}`.
    ///
    /// The first whitespace-separated token is the method, the rest is the
    /// path. Returns `None` when either part is missing.
    pub fn parse(route: &str) -> Option<Self> {
        let (method, path) = route.trim().split_once(char::is_whitespace)?;
        let path = path.trim();
        if method.is_empty() || path.is_empty() {
            return None;
        }
        Some(Self::new(method, path))
    }

    /// Route declared by the first `<MethodEndpoint method={"…"} path={"…"}>`
    /// tag of a generated page.
    pub fn from_method_endpoint(content: &str) -> Option<Self> {
        let attrs = METHOD_ENDPOINT_RE.captures(content)?.get(1)?.as_str();
        let method = METHOD_ATTR_RE.captures(attrs)?.get(1)?.as_str();
        let path = PATH_ATTR_RE.captures(attrs)?.get(1)?.as_str();
        Some(Self::new(method, path))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}
