/// Badge shown on profiles that are already on the block list

use crate::account::BlockedAccount;
use crate::i18n::{self, Language, Message};
use chrono::{DateTime, FixedOffset};

pub const INDICATOR_ID: &str = "twitter-block-indicator";

#[derive(Debug, Clone, PartialEq)]
pub struct BlockedBadge {
    pub title: String,
    pub date: String,
    pub reason: Option<String>,
    pub tags: Vec<String>,
}

impl BlockedBadge {
    pub fn new(account: &BlockedAccount, lang: Language, offset: &FixedOffset) -> BlockedBadge {
        let blocked_at: DateTime<FixedOffset> = account.blocked_at.with_timezone(offset);
        let reason = account.reason.trim();
        BlockedBadge {
            title: i18n::translate(&Message::BlockedViaExtension, lang),
            date: i18n::format_date(&blocked_at, lang),
            reason: (!reason.is_empty()).then(|| reason.to_string()),
            tags: account.tags.clone(),
        }
    }
}

/// Alt+B, matched on the logical key or the physical key code
pub fn is_block_shortcut(alt_key: bool, key: &str, code: &str) -> bool {
    alt_key && (key.eq_ignore_ascii_case("b") || code == "KeyB")
}

/// Typing targets never trigger the shortcut
pub fn is_typing_target(tag_name: &str, content_editable: bool) -> bool {
    content_editable || matches!(tag_name.to_lowercase().as_str(), "input" | "textarea")
}
