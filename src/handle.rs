/// Account handle rules for Block Keeper
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use url::Url;

use regex::Regex;

static HANDLE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^@[A-Za-z0-9_]{1,15}$").ok());

/// Hosts that serve profile pages
const PROFILE_HOSTS: &[&str] = &[
    "x.com",
    "twitter.com",
    "www.x.com",
    "www.twitter.com",
    "mobile.x.com",
    "mobile.twitter.com",
];

/// First path segments that look like handles but are app routes
const RESERVED_PATHS: &[&str] = &[
    "home",
    "explore",
    "notifications",
    "messages",
    "search",
    "i",
    "compose",
    "settings",
    "status",
    "media",
    "likes",
    "following",
    "followers",
    "with_replies",
    "lists",
    "bookmarks",
    "communities",
    "login",
    "logout",
    "signup",
    "tos",
    "privacy",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandleError {
    #[error("empty handle")]
    Empty,

    #[error("invalid handle: {0}")]
    Invalid(String),
}

/// Canonical `@name` identity.
///
/// Parsing validates; deserialization trusts whatever was persisted so one bad
/// record never poisons the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    pub fn parse(raw: &str) -> Result<Handle, HandleError> {
        let normalized = normalize(raw);
        if normalized == "@" {
            return Err(HandleError::Empty);
        }
        if is_valid(&normalized) {
            Ok(Handle(normalized))
        } else {
            Err(HandleError::Invalid(raw.trim().to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name without the leading `@`
    pub fn name(&self) -> &str {
        self.0.strip_prefix('@').unwrap_or(&self.0)
    }

    /// Case-insensitive identity comparison
    pub fn matches(&self, other: &str) -> bool {
        same_handle(&self.0, other)
    }

    pub fn profile_url(&self) -> String {
        format!("https://x.com/{}", self.name())
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Trim and prefix `@` when missing. Idempotent.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('@') {
        trimmed.to_string()
    } else {
        format!("@{}", trimmed)
    }
}

pub fn is_valid(handle: &str) -> bool {
    HANDLE_RE
        .as_ref()
        .is_some_and(|re| re.is_match(&normalize(handle)))
}

/// Handle equality ignores case and a missing `@`
pub fn same_handle(a: &str, b: &str) -> bool {
    normalize(a).eq_ignore_ascii_case(&normalize(b))
}

fn is_reserved(segment: &str) -> bool {
    RESERVED_PATHS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(segment))
}

/// Parse a URL and return its non-empty path segments, if the host serves profiles
fn profile_segments(url: &str) -> Option<Vec<String>> {
    let parsed = Url::parse(url.trim()).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let host = parsed.host_str()?.to_lowercase();
    if !PROFILE_HOSTS.contains(&host.as_str()) {
        return None;
    }

    let segments = parsed
        .path_segments()
        .map(|parts| {
            parts
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    Some(segments)
}

/// Return the profile handle iff `url` is a profile page
///
/// A profile page has exactly one path segment (a trailing slash is fine,
/// query and fragment are ignored) that is a valid handle body and not an
/// application route such as `/home` or `/settings`.
///
/// Examples:
/// - https://x.com/alice → @alice
/// - https://twitter.com/alice/?s=20 → @alice
/// - https://x.com/home → None
/// - https://x.com/alice/status/1 → None
pub fn profile_handle(url: &str) -> Option<Handle> {
    let segments = profile_segments(url)?;
    match segments.as_slice() {
        [name] if !is_reserved(name) => Handle::parse(name).ok(),
        _ => None,
    }
}

/// Any page served from x.com or twitter.com
pub fn is_site_url(url: &str) -> bool {
    profile_segments(url).is_some()
}

pub fn is_profile_page(url: &str) -> bool {
    profile_handle(url).is_some()
}

/// Handle from a link the user right-clicked, e.g. a tweet author link
pub fn link_handle(url: &str) -> Option<Handle> {
    let segments = profile_segments(url)?;
    let first = segments.first()?;
    if is_reserved(first) {
        return None;
    }
    Handle::parse(first).ok()
}

/// Handle from selected text: `@name` or a bare `name`
pub fn selection_handle(text: &str) -> Option<Handle> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return None;
    }
    Handle::parse(trimmed).ok()
}
