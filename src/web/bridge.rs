/// Imports from the JS bridge module

use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    pub async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    pub fn getUiLanguage() -> String;

    #[wasm_bindgen(catch)]
    pub async fn activeTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn sendToTab(tab_id: i32, message: JsValue) -> Result<JsValue, JsValue>;

    pub fn showNotification(title: &str, message: &str);

    pub fn createContextMenu(title: &str);

    pub fn downloadFile(filename: &str, contents: &str, mime: &str);

    pub fn closePopup();

    pub fn onRuntimeMessage(handler: &js_sys::Function);

    pub fn onCommand(handler: &js_sys::Function);

    pub fn onContextMenuClicked(handler: &js_sys::Function);

    pub fn onInstalled(handler: &js_sys::Function);
}

/// Serialize for the JS side with plain objects instead of `Map`s
pub fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}
