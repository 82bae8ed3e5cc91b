/// Data structures for Block Keeper
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::handle::Handle;

/// A blocked account as persisted in `chrome.storage.local`
///
/// Older lists stored the identity under `username`; both names are accepted
/// on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockedAccount {
    #[serde(alias = "username")]
    pub handle: Handle,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub profile_url: String,
    pub blocked_at: DateTime<Utc>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl BlockedAccount {
    pub fn new(
        handle: Handle,
        display_name: String,
        profile_url: String,
        blocked_at: DateTime<Utc>,
    ) -> BlockedAccount {
        BlockedAccount {
            handle,
            display_name,
            profile_url,
            blocked_at,
            reason: String::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Add a tag unless it is blank or already present
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let original_len = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() < original_len
    }

    /// Replace all tags, dropping blanks and keeping the first of any repeats
    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags.clear();
        for tag in tags {
            self.add_tag(tag.as_ref());
        }
    }

    /// Case-insensitive substring match over every text field
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.handle.as_str().to_lowercase().contains(&needle)
            || self.display_name.to_lowercase().contains(&needle)
            || self.reason.to_lowercase().contains(&needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}

/// Profile identity read from the page or derived from a link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileIdentity {
    #[serde(alias = "username")]
    pub handle: Handle,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub profile_url: String,
}

impl ProfileIdentity {
    pub fn from_handle(handle: Handle) -> ProfileIdentity {
        let profile_url = handle.profile_url();
        ProfileIdentity {
            handle,
            display_name: String::new(),
            profile_url,
        }
    }

    pub fn into_account(self, blocked_at: DateTime<Utc>) -> BlockedAccount {
        BlockedAccount::new(self.handle, self.display_name, self.profile_url, blocked_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn account(handle: &str) -> BlockedAccount {
        BlockedAccount::new(
            Handle::parse(handle).unwrap(),
            "Alice A.".to_string(),
            "https://x.com/alice".to_string(),
            Utc.with_ymd_and_hms(2024, 10, 28, 10, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_new_account_has_no_annotations() {
        let acc = account("@alice");

        assert_eq!(acc.handle.as_str(), "@alice");
        assert_eq!(acc.reason, "");
        assert!(acc.tags.is_empty());
    }

    #[test]
    fn test_tags_are_deduplicated() {
        let mut acc = account("@alice");

        assert!(acc.add_tag("spam"));
        assert!(!acc.add_tag("spam"));
        assert!(!acc.add_tag("   "));
        assert!(acc.add_tag(" bot "));

        assert_eq!(acc.tags, vec!["spam", "bot"]);
    }

    #[test]
    fn test_set_tags_keeps_first_occurrence() {
        let mut acc = account("@alice");
        acc.set_tags(["b", "a", "b", "", "c"]);

        assert_eq!(acc.tags, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_remove_tag() {
        let mut acc = account("@alice");
        acc.set_tags(["a", "b"]);

        assert!(acc.remove_tag("a"));
        assert!(!acc.remove_tag("zzz"));
        assert_eq!(acc.tags, vec!["b"]);
    }

    #[test]
    fn test_matches_query() {
        let mut acc = account("@alice").with_reason("Crypto SPAM");
        acc.add_tag("Scam");

        assert!(acc.matches_query("ALI"));
        assert!(acc.matches_query("alice a"));
        assert!(acc.matches_query("spam"));
        assert!(acc.matches_query("sca"));
        assert!(acc.matches_query(""));
        assert!(!acc.matches_query("bob"));
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let acc = account("@alice");
        let json = serde_json::to_value(&acc).unwrap();

        assert_eq!(json["handle"], "@alice");
        assert_eq!(json["displayName"], "Alice A.");
        assert_eq!(json["blockedAt"], "2024-10-28T10:30:00Z");
    }

    #[test]
    fn test_reads_legacy_records() {
        let json = r#"{
            "username": "@bob",
            "displayName": "",
            "userId": "",
            "profileUrl": "https://x.com/bob",
            "blockedAt": "2024-01-05T08:00:00.000Z",
            "reason": "",
            "tags": ["troll"]
        }"#;

        let acc: BlockedAccount = serde_json::from_str(json).unwrap();

        assert_eq!(acc.handle.as_str(), "@bob");
        assert_eq!(acc.tags, vec!["troll"]);
    }

    #[test]
    fn test_identity_into_account() {
        let identity = ProfileIdentity::from_handle(Handle::parse("carol").unwrap());
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let acc = identity.into_account(at);

        assert_eq!(acc.profile_url, "https://x.com/carol");
        assert_eq!(acc.blocked_at, at);
        assert!(acc.tags.is_empty());
    }
}
