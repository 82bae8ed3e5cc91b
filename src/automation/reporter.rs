/// Outcome Reporter: one localized toast and one reply per finished sequence

use super::sequencer::SequenceResult;
use crate::config::SequencerConfig;
use crate::i18n::{self, Language, Message};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// Reply sent back to whoever triggered the sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BlockReply {
    pub fn ok(handle: &str) -> BlockReply {
        BlockReply {
            success: true,
            handle: Some(handle.to_string()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> BlockReply {
        BlockReply {
            success: false,
            handle: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub message: String,
    pub severity: Severity,
    pub duration_ms: u32,
    pub reply: BlockReply,
}

/// Transient user notification, e.g. a toast on the page
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity, duration_ms: u32);
}

pub fn report(result: &SequenceResult, lang: Language, config: &SequencerConfig) -> Report {
    let (message, severity, reply) = match result {
        SequenceResult::Blocked(handle) => (
            Message::Blocked(handle.as_str()),
            Severity::Success,
            BlockReply::ok(handle.as_str()),
        ),
        SequenceResult::AlreadyBlocked(handle) => (
            Message::AlreadyBlocked(handle.as_str()),
            Severity::Warning,
            BlockReply {
                handle: Some(handle.to_string()),
                ..BlockReply::failed("Already blocked")
            },
        ),
        SequenceResult::NotOnTargetPage => (
            Message::NotOnProfile,
            Severity::Error,
            BlockReply::failed("Not on profile page"),
        ),
        SequenceResult::IdentityNotFound => (
            Message::HandleNotFound,
            Severity::Error,
            BlockReply::failed("Username not found"),
        ),
        SequenceResult::StepFailed { step, handle } => (
            Message::BlockFailed(handle.as_str()),
            Severity::Error,
            BlockReply {
                handle: Some(handle.to_string()),
                ..BlockReply::failed(format!("Block action failed at {}", step))
            },
        ),
        SequenceResult::PersistenceFailed { handle, reason } => (
            Message::BlockError,
            Severity::Error,
            BlockReply {
                handle: Some(handle.to_string()),
                ..BlockReply::failed(reason.clone())
            },
        ),
        SequenceResult::Busy => (
            Message::BlockInProgress,
            Severity::Warning,
            BlockReply::failed("Block already in progress"),
        ),
    };

    let duration_ms = match severity {
        Severity::Success => config.success_toast_ms,
        Severity::Warning => config.warning_toast_ms,
        Severity::Error => config.error_toast_ms,
    };

    Report {
        message: i18n::translate(&message, lang),
        severity,
        duration_ms,
        reply,
    }
}

pub struct OutcomeReporter<'a, N: ?Sized> {
    notifier: &'a N,
    lang: Language,
    config: &'a SequencerConfig,
}

impl<'a, N: Notifier + ?Sized> OutcomeReporter<'a, N> {
    pub fn new(notifier: &'a N, lang: Language, config: &'a SequencerConfig) -> Self {
        OutcomeReporter {
            notifier,
            lang,
            config,
        }
    }

    /// Show the toast and hand back the reply
    pub fn deliver(&self, result: &SequenceResult) -> BlockReply {
        let report = report(result, self.lang, self.config);
        self.notifier
            .notify(&report.message, report.severity, report.duration_ms);
        report.reply
    }
}
