/// Text import, JSON export and backup files

use crate::account::BlockedAccount;
use crate::handle::Handle;
use crate::storage::ImportEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const BACKUP_VERSION: &str = "1.0.0";

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("nothing to export")]
    Empty,

    #[error("malformed backup: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Backup file layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub blocked_users: Vec<BlockedAccount>,
    pub export_date: DateTime<Utc>,
    pub version: String,
}

/// A backup file or a plain exported array
#[derive(Deserialize)]
#[serde(untagged)]
enum RestoreSource {
    Backup(Backup),
    Plain(Vec<BlockedAccount>),
}

/// Parse pasted import text
///
/// One account per line: `handle`, `handle | reason` or `handle<TAB>reason`.
/// The `@` is optional. Lines whose handle is invalid are dropped.
///
/// Examples:
/// - `@alice` → (@alice, "")
/// - `bob | spam | bots` → (@bob, "spam | bots")
pub fn parse_import_text(text: &str) -> Vec<ImportEntry> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let (raw_handle, reason) = if let Some((h, r)) = line.split_once('|') {
                (h, r)
            } else if let Some((h, r)) = line.split_once('\t') {
                (h, r)
            } else {
                (line, "")
            };

            Handle::parse(raw_handle)
                .ok()
                .map(|handle| ImportEntry {
                    handle,
                    reason: reason.trim().to_string(),
                })
        })
        .collect()
}

/// Pretty JSON array of the list
pub fn export_json(accounts: &[BlockedAccount]) -> Result<String, TransferError> {
    if accounts.is_empty() {
        return Err(TransferError::Empty);
    }
    Ok(serde_json::to_string_pretty(accounts)?)
}

pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("twitter-blocked-users-{}.json", now.timestamp_millis())
}

pub fn backup_json(accounts: &[BlockedAccount], now: DateTime<Utc>) -> Result<String, TransferError> {
    if accounts.is_empty() {
        return Err(TransferError::Empty);
    }
    let backup = Backup {
        blocked_users: accounts.to_vec(),
        export_date: now,
        version: BACKUP_VERSION.to_string(),
    };
    Ok(serde_json::to_string_pretty(&backup)?)
}

pub fn backup_filename(now: DateTime<Utc>) -> String {
    format!("twitter-block-backup-{}.json", now.format("%Y-%m-%d"))
}

/// Records from a backup file or an exported array
pub fn read_backup(json: &str) -> Result<Vec<BlockedAccount>, TransferError> {
    let source: RestoreSource = serde_json::from_str(json)?;
    Ok(match source {
        RestoreSource::Backup(backup) => backup.blocked_users,
        RestoreSource::Plain(accounts) => accounts,
    })
}
