/// Runtime messages answered by the background worker

use crate::account::BlockedAccount;
use crate::handle::{self, Handle};
use crate::i18n::{self, Language, Message};
use crate::registry::{BlockRegistry, BlockStore, StoreError};
use crate::storage::{AccountUpdate, ImportEntry};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const ACTIONS: &[&str] = &[
    "blockUser",
    "checkDuplicate",
    "addBlocked",
    "getAllBlocked",
    "removeBlocked",
    "updateBlocked",
    "searchBlocked",
    "importUsers",
    "getLanguage",
    "setLanguage",
    "filterByTags",
    "getAllTags",
];

/// Language preference persisted next to the block list
#[async_trait(?Send)]
pub trait Preferences {
    async fn language(&self) -> Result<Option<Language>, StoreError>;

    async fn set_language(&self, language: Language) -> Result<(), StoreError>;

    /// Browser UI locale, used when no language was chosen yet
    fn ui_language(&self) -> String;
}

/// Fields a caller may supply for a new record
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlocked {
    #[serde(alias = "username")]
    pub handle: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub profile_url: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    BlockUser,
    CheckDuplicate {
        #[serde(alias = "username")]
        handle: String,
    },
    AddBlocked {
        data: NewBlocked,
    },
    GetAllBlocked,
    RemoveBlocked {
        #[serde(alias = "username")]
        handle: String,
    },
    UpdateBlocked {
        #[serde(alias = "username")]
        handle: String,
        updates: AccountUpdate,
    },
    SearchBlocked {
        query: String,
    },
    ImportUsers {
        users: Vec<ImportEntry>,
    },
    GetLanguage,
    SetLanguage {
        language: Language,
    },
    FilterByTags {
        #[serde(default)]
        tags: Vec<String>,
    },
    GetAllTags,
}

impl Request {
    /// Decode a raw message; unknown actions map to the matching error reply
    pub fn parse(raw: Value) -> Result<Request, Response> {
        let action = raw
            .get("action")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if !ACTIONS.contains(&action.as_str()) {
            return Err(Response::failed("Unknown action"));
        }
        serde_json::from_value(raw).map_err(|e| {
            log::warn!("malformed {} request: {}", action, e);
            Response::failed(format!("Malformed {} request: {}", action, e))
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_duplicate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<BlockedAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

impl Response {
    pub fn ok() -> Response {
        Response {
            success: Some(true),
            ..Response::default()
        }
    }

    pub fn with_data<T: Serialize>(data: &T) -> Response {
        match serde_json::to_value(data) {
            Ok(data) => Response {
                data: Some(data),
                ..Response::ok()
            },
            Err(e) => Response::failed(e.to_string()),
        }
    }

    pub fn failed(error: impl Into<String>) -> Response {
        Response {
            success: Some(false),
            error: Some(error.into()),
            ..Response::default()
        }
    }
}

fn parse_handle(raw: &str) -> Result<Handle, Response> {
    Handle::parse(raw).map_err(|e| Response::failed(e.to_string()))
}

/// Stored language, else the one detected from the browser locale
pub async fn current_language<S: Preferences>(prefs: &S) -> Language {
    match prefs.language().await {
        Ok(Some(language)) => language,
        Ok(None) => Language::detect(&prefs.ui_language()),
        Err(e) => {
            log::warn!("could not read language preference: {}", e);
            Language::detect(&prefs.ui_language())
        }
    }
}

pub async fn handle_request<S>(registry: &BlockRegistry<S>, request: Request) -> Response
where
    S: BlockStore + Preferences,
{
    match dispatch(registry, request).await {
        Ok(response) => response,
        Err(e) => {
            log::error!("request failed: {}", e);
            Response::failed(e.to_string())
        }
    }
}

async fn dispatch<S>(registry: &BlockRegistry<S>, request: Request) -> Result<Response, StoreError>
where
    S: BlockStore + Preferences,
{
    let response = match request {
        Request::BlockUser => Response::failed("Block runs in the profile tab"),
        Request::CheckDuplicate { handle } => {
            let user = registry.find(&handle::normalize(&handle)).await?;
            Response {
                is_duplicate: Some(user.is_some()),
                user,
                ..Response::default()
            }
        }
        Request::AddBlocked { data } => {
            let handle = match parse_handle(&data.handle) {
                Ok(handle) => handle,
                Err(reply) => return Ok(reply),
            };
            let profile_url = if data.profile_url.is_empty() {
                handle.profile_url()
            } else {
                data.profile_url
            };
            let mut account = BlockedAccount::new(handle, data.display_name, profile_url, Utc::now())
                .with_reason(data.reason);
            account.set_tags(data.tags);
            match registry.add(account).await {
                Ok(_) => Response::ok(),
                Err(StoreError::Duplicate(dup)) => Response::failed(dup.to_string()),
                Err(e) => return Err(e),
            }
        }
        Request::GetAllBlocked => Response::with_data(&registry.list().await?.accounts),
        Request::RemoveBlocked { handle } => Response::with_data(&registry.remove(&handle).await?),
        Request::UpdateBlocked { handle, updates } => {
            match registry.update(&handle, updates).await? {
                Some(account) => Response::with_data(&account),
                None => Response::failed(format!("{} is not blocked", handle)),
            }
        }
        Request::SearchBlocked { query } => {
            Response::with_data(&registry.list().await?.search(&query))
        }
        Request::ImportUsers { users } => Response::with_data(&registry.import(users).await?),
        Request::GetLanguage => Response {
            language: Some(current_language(registry.store()).await),
            ..Response::default()
        },
        Request::SetLanguage { language } => {
            registry.store().set_language(language).await?;
            Response::ok()
        }
        Request::FilterByTags { tags } => {
            let list = registry.list().await?;
            if tags.is_empty() {
                Response::with_data(&list.accounts)
            } else {
                Response::with_data(&list.filter_by_tags(tags.as_slice()))
            }
        }
        Request::GetAllTags => Response::with_data(&registry.list().await?.all_tags()),
    };
    Ok(response)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContextMenuOutcome {
    Added(Handle),
    AlreadyBlocked(Handle),
    NoHandle,
}

impl ContextMenuOutcome {
    pub fn message(&self, lang: Language) -> String {
        match self {
            ContextMenuOutcome::Added(h) => i18n::translate(&Message::Blocked(h.as_str()), lang),
            ContextMenuOutcome::AlreadyBlocked(h) => {
                i18n::translate(&Message::AlreadyBlocked(h.as_str()), lang)
            }
            ContextMenuOutcome::NoHandle => i18n::translate(&Message::HandleNotFound, lang),
        }
    }
}

/// "Block with extension" on a link or a text selection; records without
/// touching the page
pub async fn context_menu_block<S: BlockStore>(
    registry: &BlockRegistry<S>,
    link_url: Option<&str>,
    selection: Option<&str>,
    lang: Language,
) -> Result<ContextMenuOutcome, StoreError> {
    let handle = link_url
        .and_then(handle::link_handle)
        .or_else(|| selection.and_then(handle::selection_handle));
    let Some(handle) = handle else {
        return Ok(ContextMenuOutcome::NoHandle);
    };

    let account = BlockedAccount::new(handle.clone(), String::new(), handle.profile_url(), Utc::now())
        .with_reason(i18n::translate(&Message::ContextMenuReason, lang));
    match registry.add(account).await {
        Ok(saved) => Ok(ContextMenuOutcome::Added(saved.handle)),
        Err(StoreError::Duplicate(_)) => Ok(ContextMenuOutcome::AlreadyBlocked(handle)),
        Err(e) => Err(e),
    }
}
