use crate::automation::reporter::{Notifier, Severity};
use wasm_bindgen::prelude::*;
use web_sys::Document;

const TOAST_ID: &str = "twitter-block-toast";
const FADE_MS: i32 = 300;

/// On-page toast; a new toast replaces the previous one
pub struct ToastNotifier {
    document: Document,
    enabled: bool,
}

impl ToastNotifier {
    pub fn new(document: Document, enabled: bool) -> Self {
        ToastNotifier { document, enabled }
    }

    fn show(&self, message: &str, severity: Severity, duration_ms: u32) -> Result<(), JsValue> {
        if let Some(existing) = self.document.get_element_by_id(TOAST_ID) {
            existing.remove();
        }
        let Some(body) = self.document.body() else {
            return Ok(());
        };

        let kind = match severity {
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        let toast = self.document.create_element("div")?;
        toast.set_id(TOAST_ID);
        toast.set_class_name(&format!("twitter-block-toast twitter-block-toast-{}", kind));
        toast.set_text_content(Some(message));
        body.append_child(&toast)?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let shown = toast.clone();
        let reveal = Closure::once_into_js(move || {
            let _ = shown.class_list().add_1("twitter-block-toast-show");
        });
        window.set_timeout_with_callback_and_timeout_and_arguments_0(reveal.unchecked_ref(), 10)?;

        let hide = Closure::once_into_js(move || {
            let _ = toast.class_list().remove_1("twitter-block-toast-show");
            let remove = Closure::once_into_js(move || toast.remove());
            if let Some(window) = web_sys::window() {
                let _ = window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(remove.unchecked_ref(), FADE_MS);
            }
        });
        let duration = i32::try_from(duration_ms).unwrap_or(i32::MAX);
        window.set_timeout_with_callback_and_timeout_and_arguments_0(hide.unchecked_ref(), duration)?;
        Ok(())
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, message: &str, severity: Severity, duration_ms: u32) {
        if !self.enabled {
            log::debug!("toast suppressed by settings: {}", message);
            return;
        }
        if let Err(e) = self.show(message, severity, duration_ms) {
            log::warn!("could not show toast: {:?}", e);
        }
    }
}
