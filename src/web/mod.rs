/// Browser bindings: chrome storage, the live DOM, timers, toasts and the
/// content script / background worker entry points.
///
/// Each extension context (popup, content script, background worker) loads
/// its own wasm instance, so the registry below is the single persistence
/// path within that context.

pub mod background;
pub mod bridge;
pub mod content;
pub mod dom;
pub mod store;
pub mod timer;
pub mod toast;

use crate::registry::BlockRegistry;
use std::rc::Rc;
use store::ChromeStore;

thread_local! {
    static REGISTRY: Rc<BlockRegistry<ChromeStore>> = Rc::new(BlockRegistry::new(ChromeStore));
}

pub fn registry() -> Rc<BlockRegistry<ChromeStore>> {
    REGISTRY.with(Rc::clone)
}
