/// User settings and automation tuning stored in `chrome.storage.local`

use crate::automation::locator::LocatorConfig;
use crate::automation::settle::{Jitter, WaitPolicy};
use serde::{Deserialize, Serialize};

pub const SETTINGS_KEY: &str = "settings";
pub const AUTOMATION_KEY: &str = "automation";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Show on-page toasts
    pub notifications: bool,
    /// Close the popup after an action
    pub auto_close: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            notifications: true,
            auto_close: false,
        }
    }
}

/// Timing and matching knobs for the block sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SequencerConfig {
    /// Pause between UI steps
    pub settle: Jitter,
    /// Pause after the confirmation click
    pub final_settle: Jitter,
    /// Per-step element wait
    pub wait: WaitPolicy,
    pub locator: LocatorConfig,
    pub success_toast_ms: u32,
    pub warning_toast_ms: u32,
    pub error_toast_ms: u32,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        SequencerConfig {
            settle: Jitter::new(300, 500),
            final_settle: Jitter::new(500, 800),
            wait: WaitPolicy::default(),
            locator: LocatorConfig::default(),
            success_toast_ms: 3000,
            warning_toast_ms: 4000,
            error_toast_ms: 3000,
        }
    }
}
