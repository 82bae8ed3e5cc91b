/// Background worker: runtime messages, the Alt+B command and the context menu

use super::bridge;
use super::store;
use crate::handle;
use crate::messages::{self, ContextMenuOutcome, Request, Response};
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

const BLOCK_COMMAND: &str = "block-user";

#[derive(Deserialize)]
struct Tab {
    id: i32,
    #[serde(default)]
    url: String,
}

pub fn start() {
    let on_message = Closure::<dyn FnMut(JsValue) -> JsValue>::new(|request: JsValue| {
        future_to_promise(async move {
            let response = answer(request).await;
            bridge::to_js(&response).map_err(JsValue::from)
        })
        .into()
    });
    bridge::onRuntimeMessage(on_message.as_ref().unchecked_ref());
    on_message.forget();

    let on_command = Closure::<dyn FnMut(String)>::new(|command: String| {
        if command == BLOCK_COMMAND {
            spawn_local(forward_block_command());
        }
    });
    bridge::onCommand(on_command.as_ref().unchecked_ref());
    on_command.forget();

    let on_menu = Closure::<dyn FnMut(Option<String>, Option<String>)>::new(
        |link: Option<String>, selection: Option<String>| {
            spawn_local(context_menu(link, selection));
        },
    );
    bridge::onContextMenuClicked(on_menu.as_ref().unchecked_ref());
    on_menu.forget();

    let on_installed = Closure::<dyn FnMut(String)>::new(|reason: String| {
        bridge::createContextMenu("Block with Extension");
        if reason == "install" {
            spawn_local(async {
                let lang = store::language().await;
                if let Err(e) = store::save(crate::i18n::LANGUAGE_KEY, &lang).await {
                    log::error!("could not store detected language: {}", e);
                }
                log::info!("installed, language set to {}", lang.code());
            });
        }
    });
    bridge::onInstalled(on_installed.as_ref().unchecked_ref());
    on_installed.forget();

    log::info!("background worker ready");
}

async fn answer(request: JsValue) -> Response {
    let raw: serde_json::Value = match serde_wasm_bindgen::from_value(request) {
        Ok(raw) => raw,
        Err(e) => return Response::failed(e.to_string()),
    };
    match Request::parse(raw) {
        Ok(request) => messages::handle_request(super::registry().as_ref(), request).await,
        Err(reply) => reply,
    }
}

/// Alt+B pressed while the page did not have focus
async fn forward_block_command() {
    let tab: Option<Tab> = match bridge::activeTab().await {
        Ok(value) => serde_wasm_bindgen::from_value(value).ok().flatten(),
        Err(e) => {
            log::error!("no active tab: {:?}", e);
            return;
        }
    };
    let Some(tab) = tab else {
        log::warn!("no active tab");
        return;
    };
    if !handle::is_site_url(&tab.url) {
        log::info!("active tab is not on x.com, ignoring block command");
        return;
    }

    let message = match bridge::to_js(&serde_json::json!({ "action": "blockUser" })) {
        Ok(message) => message,
        Err(e) => {
            log::error!("could not encode block command: {}", e);
            return;
        }
    };
    match bridge::sendToTab(tab.id, message).await {
        Ok(reply) => log::debug!("block command answered: {:?}", reply),
        Err(e) => log::error!("could not reach content script: {:?}", e),
    }
}

async fn context_menu(link: Option<String>, selection: Option<String>) {
    let lang = store::language().await;
    let outcome = messages::context_menu_block(
        super::registry().as_ref(),
        link.as_deref(),
        selection.as_deref(),
        lang,
    )
    .await;

    match outcome {
        Ok(outcome) => {
            let title = match outcome {
                ContextMenuOutcome::Added(_) => "Blocked",
                ContextMenuOutcome::AlreadyBlocked(_) => "Already Blocked",
                ContextMenuOutcome::NoHandle => "Error",
            };
            bridge::showNotification(title, &outcome.message(lang));
        }
        Err(e) => {
            log::error!("context menu block failed: {}", e);
            bridge::showNotification("Error", &e.to_string());
        }
    }
}
