/// Read and activation access to the host page

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DriverError {
    #[error("element cannot be activated natively")]
    NotActivatable,

    #[error("event dispatch failed: {0}")]
    Dispatch(String),
}

/// DOM operations the automation needs from the host page
///
/// Queries never fail: an invalid selector or a subtree that has not rendered
/// yet both yield an empty result.
pub trait PageDom {
    type Element: Clone;

    fn current_url(&self) -> String;

    /// Matches in document order
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    fn query_within(&self, scope: &Self::Element, selector: &str) -> Vec<Self::Element>;

    fn closest(&self, element: &Self::Element, selector: &str) -> Option<Self::Element>;

    fn text_content(&self, element: &Self::Element) -> String;

    /// Native activation, e.g. `HTMLElement.click()`
    fn activate(&self, element: &Self::Element) -> Result<(), DriverError>;

    /// Synthetic bubbling, cancelable `click` event
    fn dispatch_click(&self, element: &Self::Element) -> Result<(), DriverError>;

    /// Close any open menu or dialog, e.g. with an Escape key press
    fn dismiss_overlays(&self);

    fn query_first(&self, selector: &str) -> Option<Self::Element> {
        self.query_all(selector).into_iter().next()
    }
}
