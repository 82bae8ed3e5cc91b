/// `PageDom` over the live document

use crate::automation::page::{DriverError, PageDom};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, KeyboardEvent, KeyboardEventInit, MouseEvent, MouseEventInit,
    NodeList,
};

pub struct BrowserPage {
    document: Document,
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl BrowserPage {
    pub fn new() -> Option<BrowserPage> {
        let document = web_sys::window()?.document()?;
        Some(BrowserPage { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl PageDom for BrowserPage {
    type Element = Element;

    fn current_url(&self) -> String {
        self.document
            .location()
            .and_then(|location| location.href().ok())
            .unwrap_or_default()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        match self.document.query_selector_all(selector) {
            Ok(list) => elements(list),
            Err(e) => {
                log::debug!("selector {} rejected: {:?}", selector, e);
                Vec::new()
            }
        }
    }

    fn query_within(&self, scope: &Element, selector: &str) -> Vec<Element> {
        scope
            .query_selector_all(selector)
            .map(elements)
            .unwrap_or_default()
    }

    fn closest(&self, element: &Element, selector: &str) -> Option<Element> {
        element.closest(selector).ok().flatten()
    }

    fn text_content(&self, element: &Element) -> String {
        element.text_content().unwrap_or_default()
    }

    fn activate(&self, element: &Element) -> Result<(), DriverError> {
        let html = element
            .dyn_ref::<HtmlElement>()
            .ok_or(DriverError::NotActivatable)?;
        html.click();
        Ok(())
    }

    fn dispatch_click(&self, element: &Element) -> Result<(), DriverError> {
        let init = MouseEventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        if let Some(window) = web_sys::window() {
            init.set_view(Some(&window));
        }
        let event = MouseEvent::new_with_mouse_event_init_dict("click", &init)
            .map_err(|e| DriverError::Dispatch(format!("{:?}", e)))?;

        // `false` only means a listener called preventDefault after handling it
        element
            .dispatch_event(&event)
            .map(|_| ())
            .map_err(|e| DriverError::Dispatch(format!("{:?}", e)))
    }

    fn dismiss_overlays(&self) {
        let init = KeyboardEventInit::new();
        init.set_key("Escape");
        init.set_code("Escape");
        init.set_bubbles(true);
        init.set_cancelable(true);

        let dispatched = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init)
            .and_then(|event| match self.document.active_element() {
                Some(target) => target.dispatch_event(&event),
                None => self.document.dispatch_event(&event),
            });
        if let Err(e) = dispatched {
            log::warn!("could not dismiss open menu: {:?}", e);
        }
    }
}
