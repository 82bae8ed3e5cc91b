/// Popup UI for Block Keeper

use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset, Local, Utc};
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::account::BlockedAccount;
use crate::config::{SETTINGS_KEY, Settings};
use crate::i18n::{self, Language, Message};
use crate::stats::{self, TimeFilter};
use crate::storage::{AccountUpdate, BlockList};
use crate::transfer::{self, TransferError};
use crate::ui::components::{AccountRow, StatCard, TagChip, TimelineDay, WeekChart};
use crate::web::{bridge, registry, store};

#[derive(Clone, PartialEq)]
enum AppState {
    Idle,
    Loading(String),
    Notice(String),
    Error(String),
}

#[derive(Clone, PartialEq)]
enum ActiveTab {
    List,
    History,
    Stats,
    Transfer,
    Settings,
}

#[derive(Clone, PartialEq)]
struct Draft {
    handle: String,
    reason: String,
    tags: Vec<String>,
    new_tag: String,
}

/// Accounts matching the search box, time window and tag filter
fn visible<'a>(
    accounts: &'a [BlockedAccount],
    query: &str,
    filter: TimeFilter,
    tag: Option<&str>,
    now: &DateTime<FixedOffset>,
) -> Vec<&'a BlockedAccount> {
    filter
        .apply(accounts, now)
        .into_iter()
        .filter(|a| a.matches_query(query))
        .filter(|a| tag.is_none_or(|tag| a.tags.iter().any(|t| t == tag)))
        .collect()
}

/// A day of the history timeline, ready to render
#[derive(Debug, Clone, PartialEq)]
struct HistoryDay {
    label: String,
    count: String,
    accounts: Vec<BlockedAccount>,
}

fn history(
    accounts: &[BlockedAccount],
    now: &DateTime<FixedOffset>,
    lang: Language,
) -> Vec<HistoryDay> {
    let today = now.date_naive();
    stats::group_by_day(accounts, now)
        .into_iter()
        .map(|(date, mut members)| {
            members.sort_by(|a, b| b.blocked_at.cmp(&a.blocked_at));
            HistoryDay {
                label: i18n::day_label(date, today, lang),
                count: i18n::translate(&Message::AccountCount(members.len()), lang),
                accounts: members.into_iter().cloned().collect(),
            }
        })
        .collect()
}

/// Close the popup after a finished action when the user asked for it
fn finish_action(settings: &Settings) {
    if settings.auto_close {
        bridge::closePopup();
    }
}

fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Loading("Loading...".to_string()));
    let accounts = use_state(Vec::<BlockedAccount>::new);
    let lang = use_state(Language::default);
    let active_tab = use_state(|| ActiveTab::List);
    let query = use_state(String::new);
    let time_filter = use_state(TimeFilter::default);
    let tag_filter = use_state(|| None::<String>);
    let selected = use_state(BTreeSet::<String>::new);
    let draft = use_state(|| None::<Draft>);
    let import_text = use_state(String::new);
    let settings = use_state(Settings::default);

    // Reload the list from storage
    let reload = {
        let state = state.clone();
        let accounts = accounts.clone();
        Callback::from(move |notice: Option<String>| {
            let state = state.clone();
            let accounts = accounts.clone();
            spawn_local(async move {
                match registry().list().await {
                    Ok(list) => {
                        accounts.set(list.accounts);
                        state.set(notice.map_or(AppState::Idle, AppState::Notice));
                    }
                    Err(e) => state.set(AppState::Error(format!("Failed to load: {}", e))),
                }
            });
        })
    };

    // Language, settings and list on mount
    {
        let lang = lang.clone();
        let settings = settings.clone();
        let reload = reload.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                lang.set(store::language().await);
                settings.set(store::load_or_default(SETTINGS_KEY).await);
            });
            reload.emit(None);
            || ()
        });
    }

    let on_language = {
        let lang = lang.clone();
        Callback::from(move |_| {
            let next = match *lang {
                Language::Serbian => Language::English,
                Language::English => Language::Serbian,
            };
            lang.set(next);
            spawn_local(async move {
                if let Err(e) = store::save(i18n::LANGUAGE_KEY, &next).await {
                    log::error!("could not save language: {}", e);
                }
            });
        })
    };

    let on_setting = {
        let settings = settings.clone();
        let state = state.clone();
        let lang = lang.clone();
        move |apply: fn(&mut Settings, bool)| {
            let settings = settings.clone();
            let state = state.clone();
            let lang = lang.clone();
            Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                let mut next = (*settings).clone();
                apply(&mut next, input.checked());
                settings.set(next.clone());
                let state = state.clone();
                let saved = i18n::translate(&Message::SettingsSaved, *lang);
                spawn_local(async move {
                    match store::save(SETTINGS_KEY, &next).await {
                        Ok(()) => state.set(AppState::Notice(saved)),
                        Err(e) => state.set(AppState::Error(format!("Save failed: {}", e))),
                    }
                });
            })
        }
    };

    let on_search = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            query.set(input.value());
        })
    };

    let on_time_filter = {
        let time_filter = time_filter.clone();
        move |filter: TimeFilter| {
            let time_filter = time_filter.clone();
            Callback::from(move |_| time_filter.set(filter))
        }
    };

    let on_tag_filter = {
        let tag_filter = tag_filter.clone();
        Callback::from(move |tag: String| {
            if tag_filter.as_deref() == Some(tag.as_str()) {
                tag_filter.set(None);
            } else {
                tag_filter.set(Some(tag));
            }
        })
    };

    let on_toggle = {
        let selected = selected.clone();
        Callback::from(move |handle: String| {
            let mut next = (*selected).clone();
            if !next.remove(&handle) {
                next.insert(handle);
            }
            selected.set(next);
        })
    };

    let on_delete = {
        let state = state.clone();
        let reload = reload.clone();
        let selected = selected.clone();
        let settings = settings.clone();
        Callback::from(move |handle: String| {
            let state = state.clone();
            let reload = reload.clone();
            let settings = (*settings).clone();
            let mut next = (*selected).clone();
            next.remove(&handle);
            selected.set(next);
            spawn_local(async move {
                match registry().remove(&handle).await {
                    Ok(_) => {
                        reload.emit(None);
                        finish_action(&settings);
                    }
                    Err(e) => state.set(AppState::Error(format!("Delete failed: {}", e))),
                }
            });
        })
    };

    let on_bulk_delete = {
        let state = state.clone();
        let reload = reload.clone();
        let selected = selected.clone();
        let lang = lang.clone();
        let settings = settings.clone();
        Callback::from(move |_| {
            let handles: Vec<String> = selected.iter().cloned().collect();
            if handles.is_empty()
                || !confirm(&i18n::translate(&Message::ConfirmBulkDelete(handles.len()), *lang))
            {
                return;
            }
            let state = state.clone();
            let reload = reload.clone();
            let settings = (*settings).clone();
            selected.set(BTreeSet::new());
            spawn_local(async move {
                match registry().remove_many(&handles).await {
                    Ok(_) => {
                        reload.emit(None);
                        finish_action(&settings);
                    }
                    Err(e) => state.set(AppState::Error(format!("Delete failed: {}", e))),
                }
            });
        })
    };

    let on_delete_all = {
        let state = state.clone();
        let reload = reload.clone();
        let selected = selected.clone();
        let lang = lang.clone();
        let settings = settings.clone();
        Callback::from(move |_| {
            if !confirm(&i18n::translate(&Message::ConfirmDeleteAll, *lang)) {
                return;
            }
            let state = state.clone();
            let reload = reload.clone();
            let notice = i18n::translate(&Message::AllDeleted, *lang);
            let settings = (*settings).clone();
            selected.set(BTreeSet::new());
            spawn_local(async move {
                match registry().clear().await {
                    Ok(_) => {
                        reload.emit(Some(notice));
                        finish_action(&settings);
                    }
                    Err(e) => state.set(AppState::Error(format!("Delete failed: {}", e))),
                }
            });
        })
    };

    let on_edit = {
        let draft = draft.clone();
        let accounts = accounts.clone();
        Callback::from(move |handle: String| {
            let list = BlockList::from_accounts((*accounts).clone());
            if let Some(account) = list.find(&handle) {
                draft.set(Some(Draft {
                    handle: account.handle.to_string(),
                    reason: account.reason.clone(),
                    tags: account.tags.clone(),
                    new_tag: String::new(),
                }));
            }
        })
    };

    let on_reason = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            if let Some(current) = (*draft).clone() {
                draft.set(Some(Draft {
                    reason: area.value(),
                    ..current
                }));
            }
        })
    };

    let on_new_tag = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(current) = (*draft).clone() {
                draft.set(Some(Draft {
                    new_tag: input.value(),
                    ..current
                }));
            }
        })
    };

    let on_add_tag = {
        let draft = draft.clone();
        Callback::from(move |_| {
            if let Some(mut current) = (*draft).clone() {
                let tag = current.new_tag.trim().to_string();
                if !tag.is_empty() && !current.tags.contains(&tag) {
                    current.tags.push(tag);
                }
                current.new_tag.clear();
                draft.set(Some(current));
            }
        })
    };

    let on_remove_tag = {
        let draft = draft.clone();
        Callback::from(move |tag: String| {
            if let Some(mut current) = (*draft).clone() {
                current.tags.retain(|t| *t != tag);
                draft.set(Some(current));
            }
        })
    };

    let on_save_edit = {
        let draft = draft.clone();
        let state = state.clone();
        let reload = reload.clone();
        Callback::from(move |_| {
            let Some(current) = (*draft).clone() else {
                return;
            };
            let state = state.clone();
            let reload = reload.clone();
            draft.set(None);
            spawn_local(async move {
                let update = AccountUpdate {
                    reason: Some(current.reason),
                    tags: Some(current.tags),
                };
                match registry().update(&current.handle, update).await {
                    Ok(_) => reload.emit(None),
                    Err(e) => state.set(AppState::Error(format!("Save failed: {}", e))),
                }
            });
        })
    };

    let on_cancel_edit = {
        let draft = draft.clone();
        Callback::from(move |_| draft.set(None))
    };

    let on_import_text = {
        let import_text = import_text.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            import_text.set(area.value());
        })
    };

    let on_import = {
        let state = state.clone();
        let reload = reload.clone();
        let import_text = import_text.clone();
        let lang = lang.clone();
        let settings = settings.clone();
        Callback::from(move |_| {
            let text = (*import_text).clone();
            let lang = *lang;
            let settings = (*settings).clone();
            let state = state.clone();
            let reload = reload.clone();
            let import_text = import_text.clone();
            state.set(AppState::Loading("Importing...".to_string()));
            spawn_local(async move {
                let trimmed = text.trim_start();
                let result = if trimmed.starts_with('{') || trimmed.starts_with('[') {
                    match transfer::read_backup(trimmed) {
                        Ok(accounts) => registry().restore(accounts).await,
                        Err(e) => {
                            state.set(AppState::Error(e.to_string()));
                            return;
                        }
                    }
                } else {
                    let entries = transfer::parse_import_text(&text);
                    if entries.is_empty() {
                        state.set(AppState::Error(i18n::translate(&Message::NothingToImport, lang)));
                        return;
                    }
                    registry().import(entries).await
                };

                match result {
                    Ok(report) => {
                        import_text.set(String::new());
                        reload.emit(Some(i18n::translate(
                            &Message::Imported {
                                added: report.added,
                                skipped: report.skipped,
                            },
                            lang,
                        )));
                        finish_action(&settings);
                    }
                    Err(e) => state.set(AppState::Error(format!("Import failed: {}", e))),
                }
            });
        })
    };

    let download = {
        let state = state.clone();
        let accounts = accounts.clone();
        let lang = lang.clone();
        let settings = settings.clone();
        move |backup: bool| {
            let state = state.clone();
            let accounts = accounts.clone();
            let lang = lang.clone();
            let settings = settings.clone();
            Callback::from(move |_| {
                let now = Utc::now();
                let (file, done) = if backup {
                    (
                        transfer::backup_json(&accounts, now).map(|json| (transfer::backup_filename(now), json)),
                        Message::BackupCreated,
                    )
                } else {
                    (
                        transfer::export_json(&accounts).map(|json| (transfer::export_filename(now), json)),
                        Message::Exported,
                    )
                };
                match file {
                    Ok((name, json)) => {
                        bridge::downloadFile(&name, &json, "application/json");
                        state.set(AppState::Notice(i18n::translate(&done, *lang)));
                        finish_action(&settings);
                    }
                    Err(TransferError::Empty) => {
                        state.set(AppState::Error(i18n::translate(&Message::NothingToExport, *lang)));
                    }
                    Err(e) => state.set(AppState::Error(e.to_string())),
                }
            })
        }
    };

    let on_tab_click = {
        let active_tab = active_tab.clone();
        move |tab: ActiveTab| {
            let active_tab = active_tab.clone();
            Callback::from(move |_| {
                active_tab.set(tab.clone());
            })
        }
    };

    let now = local_now();
    let offset = *now.offset();
    let lang_now = *lang;
    let all_tags = BlockList::from_accounts((*accounts).clone()).all_tags();
    let shown = visible(&accounts, &query, *time_filter, tag_filter.as_deref(), &now);
    let summary = stats::summary(&accounts, &now);
    let week = stats::last_seven_days(&accounts, &now);
    let timeline = history(&accounts, &now, lang_now);
    let is_busy = matches!(*state, AppState::Loading(_));

    let tab_class = |tab: ActiveTab| {
        if *active_tab == tab { "pf-v5-c-tabs__item pf-m-current" } else { "pf-v5-c-tabs__item" }
    };
    let filter_variant = |filter: TimeFilter| {
        if *time_filter == filter { ButtonVariant::Primary } else { ButtonVariant::Secondary }
    };

    html! {
        <div class="padding-20">
            <div class="popup-header">
                <h1 class="popup-title">{"Block Keeper"}</h1>
                <Button onclick={on_language} variant={ButtonVariant::Plain}>
                    {lang_now.code().to_uppercase()}
                </Button>
            </div>

            // Tab navigation
            <div class="pf-v5-c-tabs tabs-nav">
                <ul class="pf-v5-c-tabs__list">
                    <li class={tab_class(ActiveTab::List)}>
                        <button class="pf-v5-c-tabs__link" onclick={on_tab_click(ActiveTab::List)}>
                            <span class="pf-v5-c-tabs__item-text">{format!("List ({})", accounts.len())}</span>
                        </button>
                    </li>
                    <li class={tab_class(ActiveTab::History)}>
                        <button class="pf-v5-c-tabs__link" onclick={on_tab_click(ActiveTab::History)}>
                            <span class="pf-v5-c-tabs__item-text">{"History"}</span>
                        </button>
                    </li>
                    <li class={tab_class(ActiveTab::Stats)}>
                        <button class="pf-v5-c-tabs__link" onclick={on_tab_click(ActiveTab::Stats)}>
                            <span class="pf-v5-c-tabs__item-text">{"Stats"}</span>
                        </button>
                    </li>
                    <li class={tab_class(ActiveTab::Transfer)}>
                        <button class="pf-v5-c-tabs__link" onclick={on_tab_click(ActiveTab::Transfer)}>
                            <span class="pf-v5-c-tabs__item-text">{"Import/Export"}</span>
                        </button>
                    </li>
                    <li class={tab_class(ActiveTab::Settings)}>
                        <button class="pf-v5-c-tabs__link" onclick={on_tab_click(ActiveTab::Settings)}>
                            <span class="pf-v5-c-tabs__item-text">{"⚙"}</span>
                        </button>
                    </li>
                </ul>
            </div>

            // Status display
            {match &*state {
                AppState::Loading(msg) => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{msg}</p>
                    </div>
                },
                AppState::Notice(msg) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Success} title={msg.clone()} inline={true}>
                        </Alert>
                    </div>
                },
                AppState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                AppState::Idle => html! {}
            }}

            <div class="tab-pane-content">
                {match &*active_tab {
                    ActiveTab::List => html! {
                        <div class="flex-column-gap">
                            <input
                                class="pf-v5-c-form-control search-input"
                                type="search"
                                placeholder={i18n::translate(&Message::SearchPlaceholder, lang_now)}
                                value={(*query).clone()}
                                oninput={on_search}
                            />
                            <div class="filter-row">
                                <Button onclick={on_time_filter(TimeFilter::All)} variant={filter_variant(TimeFilter::All)}>{"All"}</Button>
                                <Button onclick={on_time_filter(TimeFilter::Today)} variant={filter_variant(TimeFilter::Today)}>{"Today"}</Button>
                                <Button onclick={on_time_filter(TimeFilter::Week)} variant={filter_variant(TimeFilter::Week)}>{"Week"}</Button>
                                <Button onclick={on_time_filter(TimeFilter::Month)} variant={filter_variant(TimeFilter::Month)}>{"Month"}</Button>
                            </div>
                            <div class="tag-row">
                                if all_tags.is_empty() {
                                    <span class="muted">{i18n::translate(&Message::NoTags, lang_now)}</span>
                                }
                                {for all_tags.iter().map(|tag| html! {
                                    <TagChip
                                        tag={tag.clone()}
                                        active={tag_filter.as_deref() == Some(tag.as_str())}
                                        onclick={on_tag_filter.clone()}
                                    />
                                })}
                            </div>
                            <div class="bulk-row">
                                <Button onclick={on_bulk_delete} disabled={selected.is_empty() || is_busy} variant={ButtonVariant::Secondary}>
                                    {format!("Delete selected ({})", selected.len())}
                                </Button>
                                <Button onclick={on_delete_all} disabled={accounts.is_empty() || is_busy} variant={ButtonVariant::Danger}>
                                    {"Delete all"}
                                </Button>
                            </div>

                            if let Some(current) = (*draft).clone() {
                                <div class="edit-panel">
                                    <h2 class="stats-title">{&current.handle}</h2>
                                    <textarea class="pf-v5-c-form-control" value={current.reason.clone()} oninput={on_reason} />
                                    <div class="tag-row">
                                        {for current.tags.iter().map(|tag| html! {
                                            <TagChip tag={tag.clone()} onremove={on_remove_tag.clone()} />
                                        })}
                                    </div>
                                    <div class="filter-row">
                                        <input class="pf-v5-c-form-control" type="text" value={current.new_tag.clone()} oninput={on_new_tag} />
                                        <Button onclick={on_add_tag} variant={ButtonVariant::Secondary}>{"+"}</Button>
                                    </div>
                                    <div class="filter-row">
                                        <Button onclick={on_save_edit} variant={ButtonVariant::Primary}>{"Save"}</Button>
                                        <Button onclick={on_cancel_edit} variant={ButtonVariant::Link}>{"Cancel"}</Button>
                                    </div>
                                </div>
                            }

                            <div class="account-list">
                                {for shown.iter().map(|account| html! {
                                    <AccountRow
                                        account={(*account).clone()}
                                        lang={lang_now}
                                        offset={offset}
                                        selected={selected.contains(account.handle.as_str())}
                                        on_toggle={on_toggle.clone()}
                                        on_edit={on_edit.clone()}
                                        on_delete={on_delete.clone()}
                                        on_tag={on_tag_filter.clone()}
                                    />
                                })}
                            </div>
                        </div>
                    },
                    ActiveTab::History => html! {
                        <div class="timeline">
                            if timeline.is_empty() {
                                <p class="muted">{i18n::translate(&Message::NoHistory, lang_now)}</p>
                            }
                            {for timeline.iter().map(|day| html! {
                                <TimelineDay
                                    label={day.label.clone()}
                                    count={day.count.clone()}
                                    accounts={day.accounts.clone()}
                                    offset={offset}
                                />
                            })}
                        </div>
                    },
                    ActiveTab::Stats => html! {
                        <div class="stats-container">
                            <div class="stats-box">
                                <StatCard label="Total" value={summary.total.to_string()} />
                                <StatCard label="Today" value={summary.today.to_string()} />
                                <StatCard label="Last 7 days" value={summary.week.to_string()} />
                                <StatCard label="Per day" value={format!("{:.1}", summary.average_per_day)} />
                            </div>
                            <h2 class="stats-title">{"Last 7 days"}</h2>
                            <WeekChart days={week} />
                        </div>
                    },
                    ActiveTab::Transfer => html! {
                        <div class="flex-column-gap">
                            <textarea
                                class="pf-v5-c-form-control import-text"
                                placeholder="@handle | reason"
                                value={(*import_text).clone()}
                                oninput={on_import_text}
                            />
                            <Button onclick={on_import} disabled={is_busy || import_text.trim().is_empty()} variant={ButtonVariant::Primary} block={true}>
                                {"Import"}
                            </Button>
                            <Button onclick={download(false)} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                                {"Export JSON"}
                            </Button>
                            <Button onclick={download(true)} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                                {"Backup"}
                            </Button>
                        </div>
                    },
                    ActiveTab::Settings => html! {
                        <div class="flex-column-gap">
                            <label class="setting-row">
                                <input
                                    type="checkbox"
                                    checked={settings.notifications}
                                    onchange={on_setting(|s, on| s.notifications = on)}
                                />
                                {i18n::translate(&Message::NotificationsSetting, lang_now)}
                            </label>
                            <label class="setting-row">
                                <input
                                    type="checkbox"
                                    checked={settings.auto_close}
                                    onchange={on_setting(|s, on| s.auto_close = on)}
                                />
                                {i18n::translate(&Message::AutoCloseSetting, lang_now)}
                            </label>
                        </div>
                    },
                }}
            </div>

            <p class="footer-popup">
                {"Block Keeper v0.1.0 · Alt+B"}
            </p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::Handle;
    use chrono::TimeZone;

    fn account(handle: &str, at: DateTime<Utc>, tags: &[&str]) -> BlockedAccount {
        let handle = Handle::parse(handle).unwrap();
        let url = handle.profile_url();
        let mut account = BlockedAccount::new(handle, String::new(), url, at);
        account.set_tags(tags.iter().copied());
        account
    }

    #[test]
    fn test_visible_combines_filters() {
        let now = Utc
            .with_ymd_and_hms(2024, 10, 28, 12, 0, 0)
            .unwrap()
            .fixed_offset();
        let accounts = vec![
            account("@alice", Utc.with_ymd_and_hms(2024, 10, 28, 9, 0, 0).unwrap(), &["spam"]),
            account("@alfred", Utc.with_ymd_and_hms(2024, 10, 1, 9, 0, 0).unwrap(), &["spam"]),
            account("@bob", Utc.with_ymd_and_hms(2024, 10, 28, 8, 0, 0).unwrap(), &[]),
        ];

        let handles = |found: Vec<&BlockedAccount>| -> Vec<String> {
            found.iter().map(|a| a.handle.to_string()).collect()
        };

        assert_eq!(
            handles(visible(&accounts, "al", TimeFilter::All, Some("spam"), &now)),
            vec!["@alice", "@alfred"]
        );
        assert_eq!(
            handles(visible(&accounts, "", TimeFilter::Today, None, &now)),
            vec!["@alice", "@bob"]
        );
        assert_eq!(
            handles(visible(&accounts, "AL", TimeFilter::Week, Some("spam"), &now)),
            vec!["@alice"]
        );
    }

    #[test]
    fn test_history_groups_days_newest_first() {
        let now = Utc
            .with_ymd_and_hms(2024, 10, 28, 12, 0, 0)
            .unwrap()
            .fixed_offset();
        let accounts = vec![
            account("@early", Utc.with_ymd_and_hms(2024, 10, 28, 7, 0, 0).unwrap(), &[]),
            account("@old", Utc.with_ymd_and_hms(2024, 10, 8, 9, 0, 0).unwrap(), &[]),
            account("@late", Utc.with_ymd_and_hms(2024, 10, 28, 11, 0, 0).unwrap(), &[]),
            account("@eve", Utc.with_ymd_and_hms(2024, 10, 27, 20, 0, 0).unwrap(), &[]),
        ];

        let days = history(&accounts, &now, Language::English);

        let labels: Vec<&str> = days.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["Today", "Yesterday", "October 8, 2024"]);
        assert_eq!(days[0].count, "2 accounts");
        let today: Vec<String> = days[0].accounts.iter().map(|a| a.handle.to_string()).collect();
        assert_eq!(today, vec!["@late", "@early"]);
        assert_eq!(days[2].count, "1 account");
    }
}
