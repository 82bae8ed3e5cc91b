/// Element Locator: fallback strategies for the transient block controls

use super::page::PageDom;
use super::settle::{Timer, WaitPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Profile overflow ("More") button
pub const USER_ACTIONS: &str = r#"[data-testid="userActions"]"#;
/// Block entry of the overflow menu
pub const BLOCK_MENU_ITEM: &str = r#"[role="menuitem"][data-testid="block"]"#;
/// Confirm button of the block dialog
pub const CONFIRM_SHEET: &str = r#"[data-testid="confirmationSheetConfirm"]"#;

const BUTTONS: &str = r#"button, div[role="button"]"#;
const MENU_ITEMS: &str = r#"[role="menuitem"]"#;
const DIALOG: &str = r#"[role="dialog"]"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    OverflowMenu,
    BlockMenuItem,
    ConfirmButton,
}

impl Step {
    pub fn name(self) -> &'static str {
        match self {
            Step::OverflowMenu => "overflowMenu",
            Step::BlockMenuItem => "blockMenuItem",
            Step::ConfirmButton => "confirmButton",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Localized strings the host UI may render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocatorConfig {
    /// Accessible labels of the overflow button
    pub more_labels: Vec<String>,
    /// The block verb as shown on the menu item and dialog button
    pub block_labels: Vec<String>,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        LocatorConfig {
            more_labels: vec!["More".to_string(), "Više".to_string()],
            block_labels: vec!["Block".to_string(), "Blokiraj".to_string()],
        }
    }
}

/// One way of finding a control
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// First match of a CSS selector
    Selector(String),
    /// Button whose icon has exactly `dots` circle primitives
    DotIcon { dots: usize },
    /// Menu item whose text contains a verb at a word start
    MenuItemText { verbs: Vec<String> },
    /// Text node reading `<verb> @...`, promoted to its clickable ancestor
    VerbMention { verbs: Vec<String> },
    /// Dialog button whose trimmed text equals a verb
    DialogButtonText { verbs: Vec<String> },
}

fn css_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// `needle` occurs in `haystack` at a word start, so "block" never matches "unblock"
fn contains_at_word_start(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(idx, _)| {
        haystack[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric())
    })
}

pub struct Locator {
    config: LocatorConfig,
}

impl Locator {
    pub fn new(config: LocatorConfig) -> Locator {
        Locator { config }
    }

    fn verbs(&self) -> Vec<String> {
        self.config
            .block_labels
            .iter()
            .map(|label| label.trim().to_lowercase())
            .filter(|label| !label.is_empty())
            .collect()
    }

    /// Strategies for a step, highest priority first
    pub fn strategies(&self, step: Step) -> Vec<Strategy> {
        let mut strategies = Vec::new();
        match step {
            Step::OverflowMenu => {
                strategies.push(Strategy::Selector(USER_ACTIONS.to_string()));
                for label in &self.config.more_labels {
                    let label = css_string(label);
                    strategies.push(Strategy::Selector(format!(
                        r#"button[aria-label*="{label}"], div[role="button"][aria-label*="{label}"]"#
                    )));
                }
                strategies.push(Strategy::DotIcon { dots: 3 });
            }
            Step::BlockMenuItem => {
                strategies.push(Strategy::Selector(BLOCK_MENU_ITEM.to_string()));
                for label in &self.config.block_labels {
                    strategies.push(Strategy::Selector(format!(
                        r#"[role="menuitem"][aria-label*="{}"]"#,
                        css_string(label)
                    )));
                }
                strategies.push(Strategy::MenuItemText { verbs: self.verbs() });
                strategies.push(Strategy::VerbMention { verbs: self.verbs() });
            }
            Step::ConfirmButton => {
                strategies.push(Strategy::Selector(CONFIRM_SHEET.to_string()));
                strategies.push(Strategy::Selector(
                    r#"[role="dialog"] button[data-testid="block"], [role="dialog"] div[role="button"][data-testid="block"]"#
                        .to_string(),
                ));
                strategies.push(Strategy::DialogButtonText { verbs: self.verbs() });
            }
        }
        strategies
    }

    fn run<P: PageDom>(&self, page: &P, strategy: &Strategy) -> Option<P::Element> {
        match strategy {
            Strategy::Selector(selector) => page.query_first(selector),
            Strategy::DotIcon { dots } => page.query_all(BUTTONS).into_iter().find(|button| {
                page.query_within(button, "svg")
                    .first()
                    .is_some_and(|svg| page.query_within(svg, "circle").len() == *dots)
            }),
            Strategy::MenuItemText { verbs } => page.query_all(MENU_ITEMS).into_iter().find(|item| {
                let text = page.text_content(item).to_lowercase();
                verbs.iter().any(|verb| contains_at_word_start(&text, verb))
            }),
            Strategy::VerbMention { verbs } => {
                let mentions: Vec<String> = verbs.iter().map(|v| format!("{} @", v)).collect();
                page.query_all("span").into_iter().find_map(|span| {
                    let text = page.text_content(&span).to_lowercase();
                    if mentions.iter().any(|m| contains_at_word_start(&text, m)) {
                        page.closest(&span, r#"[role="menuitem"], [role="button"], a"#)
                    } else {
                        None
                    }
                })
            }
            Strategy::DialogButtonText { verbs } => page.query_all(BUTTONS).into_iter().find(|button| {
                let text = page.text_content(button).trim().to_lowercase();
                verbs.iter().any(|verb| *verb == text) && page.closest(button, DIALOG).is_some()
            }),
        }
    }

    /// Single pass over the strategies; absence is a normal outcome
    pub fn locate_once<P: PageDom>(&self, page: &P, step: Step) -> Option<P::Element> {
        self.strategies(step)
            .iter()
            .enumerate()
            .find_map(|(rank, strategy)| {
                let found = self.run(page, strategy);
                if found.is_some() {
                    log::debug!("{} found by strategy #{} ({:?})", step, rank, strategy);
                }
                found
            })
    }

    /// Poll until the element renders or the policy's timeout elapses
    pub async fn wait_for<P, T>(
        &self,
        page: &P,
        timer: &T,
        step: Step,
        policy: &WaitPolicy,
    ) -> Option<P::Element>
    where
        P: PageDom,
        T: Timer + ?Sized,
    {
        let mut waited = Duration::ZERO;
        loop {
            if let Some(found) = self.locate_once(page, step) {
                return Some(found);
            }
            if waited >= policy.timeout() {
                log::warn!("{} not found within {:?}", step, policy.timeout());
                return None;
            }
            let pause = policy.poll_interval();
            timer.sleep(pause).await;
            waited += pause;
        }
    }
}

impl Default for Locator {
    fn default() -> Self {
        Locator::new(LocatorConfig::default())
    }
}
