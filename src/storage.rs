/// In-memory block list operations over the persisted `blockedUsers` array

use crate::account::BlockedAccount;
use crate::handle::{Handle, same_handle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key of the block list in `chrome.storage.local`
pub const BLOCKED_USERS_KEY: &str = "blockedUsers";

/// Block list, newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockList {
    pub accounts: Vec<BlockedAccount>,
}

/// One entry of a bulk import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportEntry {
    #[serde(alias = "username")]
    pub handle: Handle,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub added: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

impl ImportReport {
    fn record(&mut self, inserted: Result<(), DuplicateHandle>) {
        match inserted {
            Ok(()) => self.added += 1,
            Err(_) => self.skipped += 1,
        }
    }
}

/// Editable fields of a record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0} is already blocked")]
pub struct DuplicateHandle(pub Handle);

/// Duplicate Guard: case-insensitive lookup of a handle in a list
pub fn find_duplicate<'a>(
    accounts: &'a [BlockedAccount],
    handle: &str,
) -> Option<&'a BlockedAccount> {
    accounts.iter().find(|a| same_handle(a.handle.as_str(), handle))
}

impl BlockList {
    pub fn new() -> Self {
        BlockList {
            accounts: Vec::new(),
        }
    }

    pub fn from_accounts(accounts: Vec<BlockedAccount>) -> Self {
        BlockList { accounts }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn find(&self, handle: &str) -> Option<&BlockedAccount> {
        find_duplicate(&self.accounts, handle)
    }

    pub fn contains(&self, handle: &str) -> bool {
        self.find(handle).is_some()
    }

    /// Insert at the front; the handle must not be present yet
    pub fn insert(&mut self, account: BlockedAccount) -> Result<(), DuplicateHandle> {
        if self.contains(account.handle.as_str()) {
            return Err(DuplicateHandle(account.handle));
        }
        self.accounts.insert(0, account);
        Ok(())
    }

    pub fn remove(&mut self, handle: &str) -> bool {
        let original_len = self.accounts.len();
        self.accounts.retain(|a| !same_handle(a.handle.as_str(), handle));
        self.accounts.len() < original_len
    }

    pub fn remove_many<S: AsRef<str>>(&mut self, handles: &[S]) -> usize {
        let original_len = self.accounts.len();
        self.accounts.retain(|a| {
            !handles
                .iter()
                .any(|h| same_handle(a.handle.as_str(), h.as_ref()))
        });
        original_len - self.accounts.len()
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.accounts.len();
        self.accounts.clear();
        removed
    }

    fn find_mut(&mut self, handle: &str) -> Option<&mut BlockedAccount> {
        self.accounts
            .iter_mut()
            .find(|a| same_handle(a.handle.as_str(), handle))
    }

    pub fn update_reason(&mut self, handle: &str, reason: String) -> bool {
        self.find_mut(handle)
            .map(|account| {
                account.reason = reason;
            })
            .is_some()
    }

    pub fn set_tags(&mut self, handle: &str, tags: &[String]) -> bool {
        self.find_mut(handle)
            .map(|account| account.set_tags(tags))
            .is_some()
    }

    pub fn add_tag(&mut self, handle: &str, tag: &str) -> bool {
        self.find_mut(handle)
            .map(|account| account.add_tag(tag))
            .unwrap_or(false)
    }

    pub fn remove_tag(&mut self, handle: &str, tag: &str) -> bool {
        self.find_mut(handle)
            .map(|account| account.remove_tag(tag))
            .unwrap_or(false)
    }

    /// Apply an edit; `None` fields are left untouched
    pub fn apply_update(&mut self, handle: &str, update: AccountUpdate) -> Option<&BlockedAccount> {
        let account = self.find_mut(handle)?;
        if let Some(reason) = update.reason {
            account.reason = reason;
        }
        if let Some(tags) = update.tags {
            account.set_tags(tags);
        }
        Some(&*account)
    }

    pub fn search(&self, query: &str) -> Vec<&BlockedAccount> {
        self.accounts
            .iter()
            .filter(|a| a.matches_query(query))
            .collect()
    }

    /// Accounts carrying any of `tags`; an empty filter keeps everything
    pub fn filter_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> Vec<&BlockedAccount> {
        if tags.is_empty() {
            return self.accounts.iter().collect();
        }
        self.accounts
            .iter()
            .filter(|a| a.tags.iter().any(|t| tags.iter().any(|f| f.as_ref() == t)))
            .collect()
    }

    /// Every tag in use, sorted and unique
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .accounts
            .iter()
            .flat_map(|a| a.tags.iter().cloned())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    /// Bulk add; entries already present (or repeated in the batch) are skipped
    /// and malformed handles are reported in `errors`
    pub fn import(&mut self, entries: Vec<ImportEntry>, now: DateTime<Utc>) -> ImportReport {
        let mut report = ImportReport::default();

        for entry in entries {
            let handle = match Handle::parse(entry.handle.as_str()) {
                Ok(handle) => handle,
                Err(e) => {
                    report.errors.push(e.to_string());
                    continue;
                }
            };
            let profile_url = handle.profile_url();
            let account = BlockedAccount::new(handle, String::new(), profile_url, now)
                .with_reason(entry.reason);
            report.record(self.insert(account));
        }

        report
    }

    /// Merge backup records in their backup order, skipping handles already
    /// present and reporting malformed ones in `errors`
    pub fn restore(&mut self, accounts: Vec<BlockedAccount>) -> ImportReport {
        let mut report = ImportReport::default();

        // Oldest first so the backup order survives front insertion
        for mut account in accounts.into_iter().rev() {
            match Handle::parse(account.handle.as_str()) {
                Ok(handle) => {
                    if account.profile_url.is_empty() {
                        account.profile_url = handle.profile_url();
                    }
                    account.handle = handle;
                }
                Err(e) => {
                    report.errors.push(e.to_string());
                    continue;
                }
            }
            report.record(self.insert(account));
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_account(handle: &str) -> BlockedAccount {
        BlockedAccount::new(
            Handle::parse(handle).unwrap(),
            String::new(),
            format!("https://x.com/{}", handle.trim_start_matches('@')),
            Utc.with_ymd_and_hms(2024, 10, 28, 10, 30, 0).unwrap(),
        )
    }

    fn entry(handle: &str, reason: &str) -> ImportEntry {
        ImportEntry {
            handle: Handle::parse(handle).unwrap(),
            reason: reason.to_string(),
        }
    }

    #[test]
    fn test_block_list_new() {
        let list = BlockList::new();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
    }

    #[test]
    fn test_insert_puts_newest_first() {
        let mut list = BlockList::new();
        list.insert(create_test_account("@alice")).unwrap();
        list.insert(create_test_account("@bob")).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.accounts[0].handle.as_str(), "@bob");
    }

    #[test]
    fn test_insert_rejects_duplicate_any_case() {
        let mut list = BlockList::new();
        list.insert(create_test_account("@Foo")).unwrap();

        let err = list.insert(create_test_account("@foo")).unwrap_err();

        assert_eq!(err.0.as_str(), "@foo");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_find_duplicate_is_case_insensitive() {
        let accounts = vec![create_test_account("@Foo")];

        assert!(find_duplicate(&accounts, "@foo").is_some());
        assert!(find_duplicate(&accounts, "FOO").is_some());
        assert!(find_duplicate(&accounts, "@food").is_none());
    }

    #[test]
    fn test_remove() {
        let mut list = BlockList::new();
        list.insert(create_test_account("@alice")).unwrap();
        list.insert(create_test_account("@bob")).unwrap();

        assert!(list.remove("@ALICE"));
        assert!(!list.remove("@nobody"));
        assert_eq!(list.len(), 1);
        assert_eq!(list.accounts[0].handle.as_str(), "@bob");
    }

    #[test]
    fn test_remove_many_and_clear() {
        let mut list = BlockList::new();
        for h in ["@a", "@b", "@c"] {
            list.insert(create_test_account(h)).unwrap();
        }

        assert_eq!(list.remove_many(&["@a", "@C", "@zz"]), 2);
        assert_eq!(list.len(), 1);
        assert_eq!(list.clear(), 1);
        assert!(list.is_empty());
    }

    #[test]
    fn test_update_reason_and_tags() {
        let mut list = BlockList::new();
        list.insert(create_test_account("@alice")).unwrap();

        assert!(list.update_reason("@alice", "spam".to_string()));
        assert!(list.add_tag("@alice", "bot"));
        assert!(!list.add_tag("@alice", "bot"));
        assert!(!list.update_reason("@ghost", "x".to_string()));

        let account = list.find("@alice").unwrap();
        assert_eq!(account.reason, "spam");
        assert_eq!(account.tags, vec!["bot"]);
    }

    #[test]
    fn test_apply_update_leaves_missing_fields() {
        let mut list = BlockList::new();
        list.insert(create_test_account("@alice").with_reason("old")).unwrap();

        let updated = list
            .apply_update(
                "@alice",
                AccountUpdate {
                    reason: None,
                    tags: Some(vec!["x".to_string(), "x".to_string()]),
                },
            )
            .unwrap();

        assert_eq!(updated.reason, "old");
        assert_eq!(updated.tags, vec!["x"]);
    }

    #[test]
    fn test_search_and_tag_filters() {
        let mut list = BlockList::new();
        let mut alice = create_test_account("@alice");
        alice.set_tags(["spam", "bot"]);
        let mut bob = create_test_account("@bob");
        bob.set_tags(["troll"]);
        list.insert(alice).unwrap();
        list.insert(bob).unwrap();
        list.insert(create_test_account("@carol")).unwrap();

        assert_eq!(list.search("ALI").len(), 1);
        assert_eq!(list.search("").len(), 3);
        assert_eq!(list.filter_by_tags(&["troll", "bot"]).len(), 2);
        assert_eq!(list.filter_by_tags::<&str>(&[]).len(), 3);
        assert_eq!(list.all_tags(), vec!["bot", "spam", "troll"]);
    }

    #[test]
    fn test_import_skips_existing_and_repeats() {
        let mut list = BlockList::new();
        list.insert(create_test_account("@alice")).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 11, 1, 0, 0, 0).unwrap();

        let report = list.import(
            vec![
                entry("@Alice", ""),
                entry("@bob", "spam"),
                entry("@BOB", "again"),
            ],
            now,
        );

        assert_eq!(report.added, 1);
        assert_eq!(report.skipped, 2);
        let bob = list.find("@bob").unwrap();
        assert_eq!(bob.reason, "spam");
        assert_eq!(bob.profile_url, "https://x.com/bob");
        assert_eq!(bob.blocked_at, now);
    }

    #[test]
    fn test_import_reports_malformed_handles() {
        let mut list = BlockList::new();
        let users: Vec<ImportEntry> = serde_json::from_value(serde_json::json!([
            {"username": "bad name!"},
            {"username": "carol"},
            {"username": ""},
        ]))
        .unwrap();

        let report = list.import(users, Utc::now());

        assert_eq!(report.added, 1);
        assert_eq!(report.errors.len(), 2);
        let handles: Vec<&str> = list.accounts.iter().map(|a| a.handle.as_str()).collect();
        assert_eq!(handles, vec!["@carol"]);
    }

    #[test]
    fn test_restore_keeps_order_and_canonicalizes() {
        let mut list = BlockList::new();
        list.insert(create_test_account("@dave")).unwrap();
        let restored: Vec<BlockedAccount> = serde_json::from_value(serde_json::json!([
            {"handle": "not a handle!!", "blockedAt": "2024-10-01T10:00:00Z"},
            {"handle": "", "blockedAt": "2024-10-01T10:00:00Z"},
            {"handle": "bob", "blockedAt": "2024-10-02T10:00:00Z"},
            {"handle": "@alice", "blockedAt": "2024-10-03T10:00:00Z"},
            {"handle": "@DAVE", "blockedAt": "2024-10-04T10:00:00Z"},
        ]))
        .unwrap();

        let report = list.restore(restored);

        assert_eq!(report.added, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.errors.len(), 2);
        let handles: Vec<&str> = list.accounts.iter().map(|a| a.handle.as_str()).collect();
        assert_eq!(handles, vec!["@bob", "@alice", "@dave"]);
        assert_eq!(list.find("@bob").unwrap().profile_url, "https://x.com/bob");
    }

    #[test]
    fn test_serialization_is_a_bare_array() {
        let mut list = BlockList::new();
        list.insert(create_test_account("@alice")).unwrap();

        let json = serde_json::to_value(&list).unwrap();
        assert!(json.is_array());

        let back: BlockList = serde_json::from_value(json).unwrap();
        assert_eq!(back, list);
    }
}
