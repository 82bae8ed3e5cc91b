/// Single persistence path for the block list
///
/// Every read-modify-write goes through one async mutex so a block sequence,
/// an import and a popup edit in the same context never interleave their
/// writes.

use crate::account::BlockedAccount;
use crate::storage::{AccountUpdate, BlockList, DuplicateHandle, ImportEntry, ImportReport};
use async_trait::async_trait;
use chrono::Utc;
use futures::lock::Mutex;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("storage bridge failed: {0}")]
    Bridge(String),

    #[error("stored list is malformed: {0}")]
    Decode(String),

    #[error("could not encode list: {0}")]
    Encode(String),

    #[error(transparent)]
    Duplicate(#[from] DuplicateHandle),
}

/// Key-value persistence of the block list blob
#[async_trait(?Send)]
pub trait BlockStore {
    async fn get_list(&self) -> Result<Vec<BlockedAccount>, StoreError>;

    async fn set_list(&self, accounts: &[BlockedAccount]) -> Result<(), StoreError>;
}

pub struct BlockRegistry<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: BlockStore> BlockRegistry<S> {
    pub fn new(store: S) -> Self {
        BlockRegistry {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn list(&self) -> Result<BlockList, StoreError> {
        Ok(BlockList::from_accounts(self.store.get_list().await?))
    }

    /// Duplicate Guard lookup against the persisted list
    pub async fn find(&self, handle: &str) -> Result<Option<BlockedAccount>, StoreError> {
        Ok(self.list().await?.find(handle).cloned())
    }

    /// Locked read-modify-write; the list is written only when `edit` reports a change
    async fn modify<T>(
        &self,
        edit: impl FnOnce(&mut BlockList) -> Result<(T, bool), StoreError>,
    ) -> Result<T, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut list = self.list().await?;
        let (outcome, changed) = edit(&mut list)?;
        if changed {
            self.store.set_list(&list.accounts).await?;
        }
        Ok(outcome)
    }

    pub async fn add(&self, account: BlockedAccount) -> Result<BlockedAccount, StoreError> {
        self.modify(|list| {
            list.insert(account.clone())?;
            Ok((account, true))
        })
        .await
    }

    pub async fn remove(&self, handle: &str) -> Result<bool, StoreError> {
        self.modify(|list| {
            let removed = list.remove(handle);
            Ok((removed, removed))
        })
        .await
    }

    pub async fn remove_many(&self, handles: &[String]) -> Result<usize, StoreError> {
        self.modify(|list| {
            let removed = list.remove_many(handles);
            Ok((removed, removed > 0))
        })
        .await
    }

    pub async fn clear(&self) -> Result<usize, StoreError> {
        self.modify(|list| {
            let removed = list.clear();
            Ok((removed, removed > 0))
        })
        .await
    }

    pub async fn update(
        &self,
        handle: &str,
        update: AccountUpdate,
    ) -> Result<Option<BlockedAccount>, StoreError> {
        self.modify(|list| {
            let updated = list.apply_update(handle, update).cloned();
            let changed = updated.is_some();
            Ok((updated, changed))
        })
        .await
    }

    pub async fn import(&self, entries: Vec<ImportEntry>) -> Result<ImportReport, StoreError> {
        self.modify(|list| {
            let report = list.import(entries, Utc::now());
            let changed = report.added > 0;
            Ok((report, changed))
        })
        .await
    }

    /// Merge restored records, skipping handles already present
    pub async fn restore(&self, accounts: Vec<BlockedAccount>) -> Result<ImportReport, StoreError> {
        self.modify(|list| {
            let report = list.restore(accounts);
            let changed = report.added > 0;
            Ok((report, changed))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::FakeStore;
    use crate::handle::Handle;
    use futures::executor::block_on;
    use futures::join;

    fn account(handle: &str) -> BlockedAccount {
        let handle = Handle::parse(handle).unwrap();
        let url = handle.profile_url();
        BlockedAccount::new(handle, String::new(), url, Utc::now())
    }

    #[test]
    fn test_add_then_find_any_case() {
        let registry = BlockRegistry::new(FakeStore::default());

        block_on(registry.add(account("@Alice"))).unwrap();

        assert!(block_on(registry.find("@alice")).unwrap().is_some());
        assert_eq!(registry.store().writes(), 1);
    }

    #[test]
    fn test_duplicate_add_does_not_write() {
        let registry = BlockRegistry::new(FakeStore::with_accounts(vec![account("@bob")]));

        let err = block_on(registry.add(account("@BOB"))).unwrap_err();

        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(registry.store().writes(), 0);
        assert_eq!(registry.store().accounts().len(), 1);
    }

    #[test]
    fn test_noop_edits_do_not_write() {
        let registry = BlockRegistry::new(FakeStore::default());

        assert!(!block_on(registry.remove("@ghost")).unwrap());
        assert_eq!(block_on(registry.clear()).unwrap(), 0);
        assert!(block_on(registry.update("@ghost", AccountUpdate::default())).unwrap().is_none());
        assert_eq!(registry.store().writes(), 0);
    }

    #[test]
    fn test_update_and_remove_many() {
        let registry = BlockRegistry::new(FakeStore::with_accounts(vec![
            account("@a"),
            account("@b"),
            account("@c"),
        ]));

        let updated = block_on(registry.update(
            "@b",
            AccountUpdate {
                reason: Some("spam".to_string()),
                tags: None,
            },
        ))
        .unwrap()
        .unwrap();
        assert_eq!(updated.reason, "spam");

        let removed =
            block_on(registry.remove_many(&["@a".to_string(), "@C".to_string()])).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(registry.store().accounts().len(), 1);
    }

    #[test]
    fn test_concurrent_writers_are_serialized() {
        let registry = BlockRegistry::new(FakeStore::default().yielding());

        let (first, second) = block_on(async {
            join!(
                registry.add(account("@alice")),
                registry.import(vec![ImportEntry {
                    handle: Handle::parse("@bob").unwrap(),
                    reason: String::new(),
                }])
            )
        });

        first.unwrap();
        assert_eq!(second.unwrap().added, 1);
        assert_eq!(registry.store().accounts().len(), 2);
    }

    #[test]
    fn test_restore_keeps_order_and_skips_existing() {
        let registry = BlockRegistry::new(FakeStore::with_accounts(vec![account("@b")]));

        let report =
            block_on(registry.restore(vec![account("@a"), account("@b"), account("@c")])).unwrap();

        assert_eq!(report.added, 2);
        assert_eq!(report.skipped, 1);
        let handles: Vec<String> = registry
            .store()
            .accounts()
            .iter()
            .map(|a| a.handle.to_string())
            .collect();
        assert_eq!(handles, vec!["@a", "@c", "@b"]);
    }

    #[test]
    fn test_restore_drops_malformed_handles() {
        let registry = BlockRegistry::new(FakeStore::default());
        let backup = r#"[
            {"handle": "not a handle!!", "blockedAt": "2024-10-01T10:00:00Z"},
            {"handle": "", "blockedAt": "2024-10-01T10:00:00Z"},
            {"handle": "bob", "blockedAt": "2024-10-01T10:00:00Z"}
        ]"#;

        let accounts = crate::transfer::read_backup(backup).unwrap();
        let report = block_on(registry.restore(accounts)).unwrap();

        assert_eq!(report.added, 1);
        assert_eq!(report.errors.len(), 2);
        let handles: Vec<String> = registry
            .store()
            .accounts()
            .iter()
            .map(|a| a.handle.to_string())
            .collect();
        assert_eq!(handles, vec!["@bob"]);
    }

    #[test]
    fn test_store_failure_surfaces() {
        let registry = BlockRegistry::new(FakeStore::default().failing_writes());

        let err = block_on(registry.add(account("@alice"))).unwrap_err();

        assert!(matches!(err, StoreError::Bridge(_)));
    }
}
