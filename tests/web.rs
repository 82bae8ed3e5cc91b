// Browser tests for the live-DOM bindings; run with `wasm-pack test --headless --chrome`
#![cfg(target_arch = "wasm32")]

use block_keeper::automation::driver::{ActionDriver, ClickPath};
use block_keeper::automation::locator::{Locator, Step};
use block_keeper::automation::page::PageDom;
use block_keeper::automation::settle::{Timer, WaitPolicy};
use block_keeper::indicator::{BlockedBadge, INDICATOR_ID};
use block_keeper::web::content::render_badge;
use block_keeper::web::dom::BrowserPage;
use block_keeper::web::timer::BrowserTimer;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mount(html: &str) -> BrowserPage {
    let page = BrowserPage::new().unwrap();
    let body = page.document().body().unwrap();
    body.set_inner_html(html);
    page
}

#[wasm_bindgen_test]
fn locates_stable_markers() {
    let page = mount(
        r#"<div role="dialog"><button data-testid="confirmationSheetConfirm">Block</button></div>"#,
    );

    let found = Locator::default().locate_once(&page, Step::ConfirmButton).unwrap();

    assert_eq!(page.text_content(&found), "Block");
    assert!(page.closest(&found, r#"[role="dialog"]"#).is_some());
}

#[wasm_bindgen_test]
fn unblock_item_is_never_chosen() {
    let page = mount(
        r#"<div role="menuitem" id="u">Unblock @alice</div><div role="menuitem" id="b">Block @alice</div>"#,
    );

    let found = Locator::default().locate_once(&page, Step::BlockMenuItem).unwrap();

    assert_eq!(found.id(), "b");
}

#[wasm_bindgen_test]
fn invalid_selector_yields_nothing() {
    let page = mount("<p>empty</p>");
    assert!(page.query_all("[[[").is_empty());
}

#[wasm_bindgen_test]
fn native_click_reaches_listener() {
    let page = mount(r#"<button id="target">More</button>"#);
    let target = page.query_first("#target").unwrap();
    let clicks = Rc::new(Cell::new(0));
    let counter = clicks.clone();
    let listener = Closure::<dyn FnMut()>::new(move || counter.set(counter.get() + 1));
    target
        .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
        .unwrap();

    assert_eq!(ActionDriver::new().click(&page, &target), Ok(ClickPath::Native));
    assert_eq!(clicks.get(), 1);
}

#[wasm_bindgen_test]
fn synthetic_click_bubbles() {
    let page = mount(r#"<div id="outer"><span id="inner">x</span></div>"#);
    let outer = page.query_first("#outer").unwrap();
    let inner = page.query_first("#inner").unwrap();
    let seen = Rc::new(Cell::new(false));
    let flag = seen.clone();
    let listener = Closure::<dyn FnMut()>::new(move || flag.set(true));
    outer
        .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
        .unwrap();

    page.dispatch_click(&inner).unwrap();

    assert!(seen.get());
}

#[wasm_bindgen_test]
fn prevented_synthetic_click_still_counts() {
    let page = mount(r#"<svg><path id="dots" d="M0 0"></path></svg>"#);
    let dots = page.query_first("#dots").unwrap();
    let listener = Closure::<dyn FnMut(web_sys::Event)>::new(|event: web_sys::Event| {
        event.prevent_default();
    });
    dots.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
        .unwrap();

    assert_eq!(page.dispatch_click(&dots), Ok(()));
    assert_eq!(ActionDriver::new().click(&page, &dots), Ok(ClickPath::Synthetic));
    listener.forget();
}

#[wasm_bindgen_test]
fn badge_renders_every_section() {
    let page = mount("");
    let badge = BlockedBadge {
        title: "Blocked via extension".to_string(),
        date: "10/28/2024".to_string(),
        reason: Some("spam".to_string()),
        tags: vec!["bot".to_string(), "troll".to_string()],
    };

    render_badge(page.document(), &badge).unwrap();
    render_badge(page.document(), &badge).unwrap();

    let root = page.document().get_element_by_id(INDICATOR_ID).unwrap();
    assert_eq!(page.query_all(&format!("#{}", INDICATOR_ID)).len(), 1);
    assert_eq!(page.query_within(&root, ".indicator-tag").len(), 2);
    let reason = page.query_within(&root, ".block-indicator-reason");
    assert_eq!(page.text_content(&reason[0]), "spam");
}

#[wasm_bindgen_test]
async fn browser_timer_waits() {
    let start = js_sys::Date::now();
    BrowserTimer.sleep(Duration::from_millis(30)).await;
    assert!(js_sys::Date::now() - start >= 25.0);
}

#[wasm_bindgen_test]
async fn wait_for_sees_late_render() {
    let page = mount("");
    let document = page.document().clone();
    let render = Closure::once_into_js(move || {
        if let Some(body) = document.body() {
            body.set_inner_html(r#"<div data-testid="userActions">…</div>"#);
        }
    });
    web_sys::window()
        .unwrap()
        .set_timeout_with_callback_and_timeout_and_arguments_0(render.unchecked_ref(), 50)
        .unwrap();

    let found = Locator::default()
        .wait_for(&page, &BrowserTimer, Step::OverflowMenu, &WaitPolicy::default())
        .await;

    assert!(found.is_some());
}
