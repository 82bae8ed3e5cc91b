/// Block automation for the host page
///
/// The sequencer drives the overflow menu → block item → confirm dialog flow
/// through the [`page::PageDom`] seam so the whole flow runs against fakes in
/// tests and against `web_sys` in the content script.

pub mod driver;
pub mod locator;
pub mod page;
pub mod profile;
pub mod reporter;
pub mod sequencer;
pub mod settle;
