/// Reusable UI components

use crate::account::BlockedAccount;
use crate::i18n::{self, Language};
use crate::stats::DayCount;
use chrono::FixedOffset;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub label: AttrValue,
    pub value: AttrValue,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="stat-item">
            <span class="stat-label">{&props.label}</span>
            <span class="stat-count">{&props.value}</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct WeekChartProps {
    pub days: Vec<DayCount>,
}

/// Bar per day, scaled to the busiest day
#[function_component(WeekChart)]
pub fn week_chart(props: &WeekChartProps) -> Html {
    let peak = props.days.iter().map(|d| d.count).max().unwrap_or(0).max(1);

    html! {
        <div class="week-chart">
            {for props.days.iter().map(|day| {
                let height = day.count * 100 / peak;
                html! {
                    <div class="week-chart-column" title={format!("{}: {}", day.date, day.count)}>
                        <div class="week-chart-bar" style={format!("height: {}%;", height)}></div>
                        <span class="week-chart-label">{day.date.format("%d.%m").to_string()}</span>
                    </div>
                }
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TagChipProps {
    pub tag: AttrValue,
    #[prop_or(false)]
    pub active: bool,
    #[prop_or_default]
    pub onclick: Option<Callback<String>>,
    #[prop_or_default]
    pub onremove: Option<Callback<String>>,
}

#[function_component(TagChip)]
pub fn tag_chip(props: &TagChipProps) -> Html {
    let class = if props.active { "tag-chip tag-chip-active" } else { "tag-chip" };

    let onclick = props.onclick.clone().map(|cb| {
        let tag = props.tag.to_string();
        Callback::from(move |_: MouseEvent| cb.emit(tag.clone()))
    });
    let onremove = props.onremove.clone().map(|cb| {
        let tag = props.tag.to_string();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            cb.emit(tag.clone())
        })
    });

    html! {
        <span class={class} onclick={onclick}>
            {&props.tag}
            if let Some(onremove) = onremove {
                <button class="tag-chip-remove" onclick={onremove}>{"×"}</button>
            }
        </span>
    }
}

#[derive(Properties, PartialEq)]
pub struct AccountRowProps {
    pub account: BlockedAccount,
    pub lang: Language,
    pub offset: FixedOffset,
    #[prop_or(false)]
    pub selected: bool,
    pub on_toggle: Callback<String>,
    pub on_edit: Callback<String>,
    pub on_delete: Callback<String>,
    pub on_tag: Callback<String>,
}

#[function_component(AccountRow)]
pub fn account_row(props: &AccountRowProps) -> Html {
    let account = &props.account;
    let handle = account.handle.to_string();
    let date = i18n::format_date(&account.blocked_at.with_timezone(&props.offset), props.lang);

    let emit = |cb: &Callback<String>| {
        let cb = cb.clone();
        let handle = handle.clone();
        Callback::from(move |_: MouseEvent| cb.emit(handle.clone()))
    };
    let ontoggle = {
        let cb = props.on_toggle.clone();
        let handle = handle.clone();
        Callback::from(move |_: Event| cb.emit(handle.clone()))
    };

    html! {
        <div class={if props.selected { "account-row account-row-selected" } else { "account-row" }}>
            <input type="checkbox" checked={props.selected} onchange={ontoggle} />
            <div class="account-main">
                <a class="account-handle" href={account.profile_url.clone()} target="_blank">
                    {&handle}
                </a>
                if !account.display_name.is_empty() {
                    <span class="account-name">{&account.display_name}</span>
                }
                <span class="account-date">{date}</span>
                if !account.reason.is_empty() {
                    <p class="account-reason">{&account.reason}</p>
                }
                <div class="account-tags">
                    {for account.tags.iter().map(|tag| html! {
                        <TagChip tag={tag.clone()} onclick={props.on_tag.clone()} />
                    })}
                </div>
            </div>
            <div class="account-actions">
                <button class="icon-button" title="Edit" onclick={emit(&props.on_edit)}>{"✏️"}</button>
                <button class="icon-button" title="Delete" onclick={emit(&props.on_delete)}>{"🗑️"}</button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TimelineDayProps {
    pub label: AttrValue,
    pub count: AttrValue,
    pub accounts: Vec<BlockedAccount>,
    pub offset: FixedOffset,
}

/// One day of the block history, newest block first
#[function_component(TimelineDay)]
pub fn timeline_day(props: &TimelineDayProps) -> Html {
    html! {
        <div class="timeline-group">
            <div class="timeline-date">
                <span class="date-text">{&props.label}</span>
                <span class="date-count">{&props.count}</span>
            </div>
            <div class="timeline-items">
                {for props.accounts.iter().map(|account| {
                    let time = i18n::format_time(&account.blocked_at.with_timezone(&props.offset));
                    html! {
                        <div class="timeline-item">
                            <div class="timeline-header">
                                <a class="timeline-username" href={account.profile_url.clone()} target="_blank">
                                    {account.handle.to_string()}
                                </a>
                                <span class="timeline-time">{time}</span>
                            </div>
                            if !account.display_name.is_empty() {
                                <div class="timeline-display-name">{&account.display_name}</div>
                            }
                            if !account.reason.is_empty() {
                                <div class="timeline-reason">{&account.reason}</div>
                            }
                            <div class="timeline-tags">
                                {for account.tags.iter().map(|tag| html! {
                                    <span class="timeline-tag">{tag}</span>
                                })}
                            </div>
                        </div>
                    }
                })}
            </div>
        </div>
    }
}
