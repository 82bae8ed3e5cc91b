/// Action Driver: one click per call, synthetic event only as a fallback

use super::page::{DriverError, PageDom};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickPath {
    Native,
    Synthetic,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ActionDriver;

impl ActionDriver {
    pub fn new() -> Self {
        ActionDriver
    }

    /// Activate `element`; never retries
    pub fn click<P: PageDom>(&self, page: &P, element: &P::Element) -> Result<ClickPath, DriverError> {
        match page.activate(element) {
            Ok(()) => Ok(ClickPath::Native),
            Err(native) => {
                log::warn!("native activation failed ({}), dispatching synthetic click", native);
                page.dispatch_click(element).map(|()| ClickPath::Synthetic)
            }
        }
    }
}
