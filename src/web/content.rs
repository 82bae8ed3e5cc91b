/// Content script: Alt+B, the `blockUser` message and the blocked-profile badge

use super::bridge;
use super::dom::BrowserPage;
use super::store;
use super::timer::BrowserTimer;
use super::toast::ToastNotifier;
use crate::automation::page::PageDom;
use crate::automation::reporter::{BlockReply, OutcomeReporter};
use crate::automation::sequencer::{BlockSequencer, SequenceGate};
use crate::config::{AUTOMATION_KEY, SETTINGS_KEY, SequencerConfig, Settings};
use crate::handle;
use crate::indicator::{self, BlockedBadge, INDICATOR_ID};
use chrono::Local;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::{Document, HtmlElement, KeyboardEvent, MutationObserver, MutationObserverInit};

thread_local! {
    static GATE: Rc<SequenceGate> = Rc::new(SequenceGate::default());
}

pub fn start() -> Result<(), JsValue> {
    let page = BrowserPage::new().ok_or_else(|| JsValue::from_str("no document"))?;
    let document = page.document().clone();

    install_shortcut(&document)?;
    install_message_listener();
    watch_url(&document, page.current_url())?;
    spawn_local(refresh_indicator());

    log::info!("content script ready");
    Ok(())
}

/// Run one block sequence and report it
pub async fn block_current_profile() -> BlockReply {
    let Some(page) = BrowserPage::new() else {
        return BlockReply::failed("No document");
    };
    let gate = GATE.with(Rc::clone);
    let registry = super::registry();
    let config: SequencerConfig = store::load_or_default(AUTOMATION_KEY).await;
    let settings: Settings = store::load_or_default(SETTINGS_KEY).await;
    let lang = store::language().await;

    let result = BlockSequencer::new(&page, registry.as_ref(), &BrowserTimer, &gate, config.clone())
        .run()
        .await;

    let notifier = ToastNotifier::new(page.document().clone(), settings.notifications);
    let reply = OutcomeReporter::new(&notifier, lang, &config).deliver(&result);
    if result.is_success() {
        refresh_indicator().await;
    }
    reply
}

fn is_typing(document: &Document) -> bool {
    document.active_element().is_some_and(|active| {
        let editable = active
            .dyn_ref::<HtmlElement>()
            .is_some_and(HtmlElement::is_content_editable);
        indicator::is_typing_target(&active.tag_name(), editable)
    })
}

fn install_shortcut(document: &Document) -> Result<(), JsValue> {
    let doc = document.clone();
    let listener = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        if !indicator::is_block_shortcut(event.alt_key(), &event.key(), &event.code()) {
            return;
        }
        if is_typing(&doc) {
            return;
        }
        event.prevent_default();
        log::debug!("Alt+B pressed");
        spawn_local(async {
            let reply = block_current_profile().await;
            log::debug!("shortcut block finished: {:?}", reply);
        });
    });
    document.add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}

fn install_message_listener() {
    let handler = Closure::<dyn FnMut(JsValue) -> JsValue>::new(|request: JsValue| {
        let is_block = serde_wasm_bindgen::from_value::<serde_json::Value>(request)
            .ok()
            .and_then(|raw| raw.get("action").and_then(|a| a.as_str()).map(|a| a == "blockUser"))
            .unwrap_or(false);
        if !is_block {
            return JsValue::UNDEFINED;
        }
        future_to_promise(async {
            let reply = block_current_profile().await;
            bridge::to_js(&reply).map_err(JsValue::from)
        })
        .into()
    });
    bridge::onRuntimeMessage(handler.as_ref().unchecked_ref());
    handler.forget();
}

/// SPA navigation does not reload the script, so watch the URL through DOM churn
fn watch_url(document: &Document, initial: String) -> Result<(), JsValue> {
    let last_url = Rc::new(RefCell::new(initial));
    let callback = Closure::<dyn FnMut()>::new(move || {
        let Some(page) = BrowserPage::new() else {
            return;
        };
        let url = page.current_url();
        if *last_url.borrow() != url {
            log::debug!("url changed: {}", url);
            *last_url.borrow_mut() = url;
            spawn_local(refresh_indicator());
        }
    });

    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
    let init = MutationObserverInit::new();
    init.set_child_list(true);
    init.set_subtree(true);
    observer.observe_with_options(document, &init)?;
    callback.forget();
    Ok(())
}

async fn refresh_indicator() {
    let Some(page) = BrowserPage::new() else {
        return;
    };
    let document = page.document();
    if let Some(existing) = document.get_element_by_id(INDICATOR_ID) {
        existing.remove();
    }

    let Some(handle) = handle::profile_handle(&page.current_url()) else {
        return;
    };
    let account = match super::registry().find(handle.as_str()).await {
        Ok(Some(account)) => account,
        Ok(None) => return,
        Err(e) => {
            log::error!("could not check block status of {}: {}", handle, e);
            return;
        }
    };

    let lang = store::language().await;
    let badge = BlockedBadge::new(&account, lang, Local::now().offset());
    if let Err(e) = render_badge(document, &badge) {
        log::warn!("could not show block indicator: {:?}", e);
    }
}

pub fn render_badge(document: &Document, badge: &BlockedBadge) -> Result<(), JsValue> {
    let Some(body) = document.body() else {
        return Ok(());
    };
    // A newer refresh may have rendered while this one awaited storage
    if let Some(existing) = document.get_element_by_id(INDICATOR_ID) {
        existing.remove();
    }

    let div = |class: &str, text: Option<&str>| -> Result<web_sys::Element, JsValue> {
        let el = document.create_element("div")?;
        el.set_class_name(class);
        if let Some(text) = text {
            el.set_text_content(Some(text));
        }
        Ok(el)
    };

    let root = div("twitter-block-indicator", None)?;
    root.set_id(INDICATOR_ID);
    let icon = div("block-indicator-icon", Some("🚫"))?;
    root.append_child(&icon)?;

    let content = div("block-indicator-content", None)?;
    let title = div("block-indicator-title", Some(&badge.title))?;
    content.append_child(&title)?;
    let date = div("block-indicator-date", Some(&badge.date))?;
    content.append_child(&date)?;
    if let Some(reason) = &badge.reason {
        let reason = div("block-indicator-reason", Some(reason))?;
        content.append_child(&reason)?;
    }
    if !badge.tags.is_empty() {
        let tags = div("block-indicator-tags", None)?;
        for tag in &badge.tags {
            let chip = document.create_element("span")?;
            chip.set_class_name("indicator-tag");
            chip.set_text_content(Some(tag));
            tags.append_child(&chip)?;
        }
        content.append_child(&tags)?;
    }
    root.append_child(&content)?;
    body.append_child(&root)?;

    let shown = root.clone();
    let reveal = Closure::once_into_js(move || {
        let _ = shown.class_list().add_1("show");
    });
    if let Some(window) = web_sys::window() {
        window.set_timeout_with_callback_and_timeout_and_arguments_0(reveal.unchecked_ref(), 100)?;
    }
    Ok(())
}
