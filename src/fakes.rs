/// In-memory page, timer, store and notifier used by unit tests

use crate::account::BlockedAccount;
use crate::automation::locator::{BLOCK_MENU_ITEM, CONFIRM_SHEET, USER_ACTIONS};
use crate::automation::page::{DriverError, PageDom};
use crate::automation::reporter::{Notifier, Severity};
use crate::automation::settle::Timer;
use crate::i18n::Language;
use crate::messages::Preferences;
use crate::registry::{BlockStore, StoreError};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    Native,
    Synthetic,
}

/// Page whose elements are plain ids wired up by selector
#[derive(Default)]
pub struct FakePage {
    urls: RefCell<VecDeque<String>>,
    selectors: HashMap<String, Vec<usize>>,
    within: HashMap<(usize, String), Vec<usize>>,
    closest: HashMap<(usize, String), usize>,
    text: HashMap<usize, String>,
    hidden: RefCell<HashMap<String, usize>>,
    native_fails: HashSet<usize>,
    dispatch_fails: HashSet<usize>,
    clicks: RefCell<Vec<(usize, Click)>>,
    dismissals: Cell<usize>,
}

impl FakePage {
    pub fn new(url: &str) -> FakePage {
        FakePage {
            urls: RefCell::new(VecDeque::from([url.to_string()])),
            ..FakePage::default()
        }
    }

    /// Profile page where every stable marker is present: 1 opens the menu,
    /// 2 is the menu item, 3 confirms
    pub fn block_flow(url: &str) -> FakePage {
        FakePage::new(url)
            .with(USER_ACTIONS, 1)
            .with(BLOCK_MENU_ITEM, 2)
            .with(CONFIRM_SHEET, 3)
    }

    /// Next URL reported once the current one has been read
    pub fn then_url(self, url: &str) -> FakePage {
        self.urls.borrow_mut().push_back(url.to_string());
        self
    }

    pub fn with(mut self, selector: &str, id: usize) -> FakePage {
        self.selectors.entry(selector.to_string()).or_default().push(id);
        self
    }

    pub fn with_within(mut self, scope: usize, selector: &str, id: usize) -> FakePage {
        self.within
            .entry((scope, selector.to_string()))
            .or_default()
            .push(id);
        self
    }

    pub fn with_closest(mut self, id: usize, selector: &str, ancestor: usize) -> FakePage {
        self.closest.insert((id, selector.to_string()), ancestor);
        self
    }

    pub fn with_text(mut self, id: usize, text: &str) -> FakePage {
        self.text.insert(id, text.to_string());
        self
    }

    /// `selector` matches nothing for the first `polls` queries
    pub fn hidden_for(self, selector: &str, polls: usize) -> FakePage {
        self.hidden.borrow_mut().insert(selector.to_string(), polls);
        self
    }

    pub fn failing_native(mut self, id: usize) -> FakePage {
        self.native_fails.insert(id);
        self
    }

    pub fn failing_dispatch(mut self, id: usize) -> FakePage {
        self.dispatch_fails.insert(id);
        self
    }

    /// Successful clicks in order
    pub fn clicks(&self) -> Vec<(usize, Click)> {
        self.clicks.borrow().clone()
    }

    pub fn dismissals(&self) -> usize {
        self.dismissals.get()
    }
}

impl PageDom for FakePage {
    type Element = usize;

    fn current_url(&self) -> String {
        let mut urls = self.urls.borrow_mut();
        if urls.len() > 1 {
            urls.pop_front().unwrap_or_default()
        } else {
            urls.front().cloned().unwrap_or_default()
        }
    }

    fn query_all(&self, selector: &str) -> Vec<usize> {
        if let Some(remaining) = self.hidden.borrow_mut().get_mut(selector) {
            if *remaining > 0 {
                *remaining -= 1;
                return Vec::new();
            }
        }
        self.selectors.get(selector).cloned().unwrap_or_default()
    }

    fn query_within(&self, scope: &usize, selector: &str) -> Vec<usize> {
        self.within
            .get(&(*scope, selector.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    fn closest(&self, element: &usize, selector: &str) -> Option<usize> {
        self.closest.get(&(*element, selector.to_string())).copied()
    }

    fn text_content(&self, element: &usize) -> String {
        self.text.get(element).cloned().unwrap_or_default()
    }

    fn activate(&self, element: &usize) -> Result<(), DriverError> {
        if self.native_fails.contains(element) {
            return Err(DriverError::NotActivatable);
        }
        self.clicks.borrow_mut().push((*element, Click::Native));
        Ok(())
    }

    fn dispatch_click(&self, element: &usize) -> Result<(), DriverError> {
        if self.dispatch_fails.contains(element) {
            return Err(DriverError::Dispatch("detached".to_string()));
        }
        self.clicks.borrow_mut().push((*element, Click::Synthetic));
        Ok(())
    }

    fn dismiss_overlays(&self) {
        self.dismissals.set(self.dismissals.get() + 1);
    }
}

/// Records requested sleeps and returns at once
#[derive(Default)]
pub struct FakeTimer {
    sleeps: RefCell<Vec<Duration>>,
}

impl FakeTimer {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }

    pub fn total(&self) -> Duration {
        self.sleeps.borrow().iter().sum()
    }
}

#[async_trait(?Send)]
impl Timer for FakeTimer {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }
}

/// Pending exactly once, so concurrent futures get a chance to interleave
#[derive(Default)]
struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

#[derive(Default)]
pub struct FakeStore {
    accounts: RefCell<Vec<BlockedAccount>>,
    reads: Cell<usize>,
    writes: Cell<usize>,
    language: RefCell<Option<Language>>,
    ui_language: String,
    yielding: bool,
    failing_writes: bool,
}

impl FakeStore {
    pub fn with_accounts(accounts: Vec<BlockedAccount>) -> FakeStore {
        FakeStore {
            accounts: RefCell::new(accounts),
            ..FakeStore::default()
        }
    }

    pub fn yielding(mut self) -> FakeStore {
        self.yielding = true;
        self
    }

    pub fn failing_writes(mut self) -> FakeStore {
        self.failing_writes = true;
        self
    }

    pub fn with_ui_language(mut self, ui_language: &str) -> FakeStore {
        self.ui_language = ui_language.to_string();
        self
    }

    pub fn accounts(&self) -> Vec<BlockedAccount> {
        self.accounts.borrow().clone()
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

#[async_trait(?Send)]
impl BlockStore for FakeStore {
    async fn get_list(&self) -> Result<Vec<BlockedAccount>, StoreError> {
        if self.yielding {
            YieldNow::default().await;
        }
        self.reads.set(self.reads.get() + 1);
        Ok(self.accounts.borrow().clone())
    }

    async fn set_list(&self, accounts: &[BlockedAccount]) -> Result<(), StoreError> {
        if self.failing_writes {
            return Err(StoreError::Bridge("quota exceeded".to_string()));
        }
        if self.yielding {
            YieldNow::default().await;
        }
        *self.accounts.borrow_mut() = accounts.to_vec();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[async_trait(?Send)]
impl Preferences for FakeStore {
    async fn language(&self) -> Result<Option<Language>, StoreError> {
        Ok(*self.language.borrow())
    }

    async fn set_language(&self, language: Language) -> Result<(), StoreError> {
        *self.language.borrow_mut() = Some(language);
        Ok(())
    }

    fn ui_language(&self) -> String {
        self.ui_language.clone()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    shown: RefCell<Vec<(String, Severity, u32)>>,
}

impl RecordingNotifier {
    pub fn shown(&self) -> Vec<(String, Severity, u32)> {
        self.shown.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity, duration_ms: u32) {
        self.shown
            .borrow_mut()
            .push((message.to_string(), severity, duration_ms));
    }
}
