/// Block Sequencer: explicit state machine for one block action

use super::driver::ActionDriver;
use super::locator::{Locator, Step};
use super::page::PageDom;
use super::profile;
use super::settle::{Jitter, Timer};
use crate::account::ProfileIdentity;
use crate::config::SequencerConfig;
use crate::handle::{self, Handle};
use crate::registry::{BlockRegistry, BlockStore, StoreError};
use chrono::Utc;
use std::cell::Cell;

/// Terminal outcome of one run
#[derive(Debug, Clone, PartialEq)]
pub enum SequenceResult {
    Blocked(Handle),
    AlreadyBlocked(Handle),
    NotOnTargetPage,
    IdentityNotFound,
    StepFailed { step: Step, handle: Handle },
    PersistenceFailed { handle: Handle, reason: String },
    /// Another sequence was already in flight
    Busy,
}

impl SequenceResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SequenceResult::Blocked(_))
    }

    pub fn handle(&self) -> Option<&Handle> {
        match self {
            SequenceResult::Blocked(h)
            | SequenceResult::AlreadyBlocked(h)
            | SequenceResult::StepFailed { handle: h, .. }
            | SequenceResult::PersistenceFailed { handle: h, .. } => Some(h),
            SequenceResult::NotOnTargetPage
            | SequenceResult::IdentityNotFound
            | SequenceResult::Busy => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SequenceState {
    Idle,
    CheckingContext,
    CheckingDuplicate(ProfileIdentity),
    OpeningMenu(ProfileIdentity),
    SelectingBlock(ProfileIdentity),
    ConfirmingBlock(ProfileIdentity),
    Persisting(ProfileIdentity),
    Done(SequenceResult),
}

impl SequenceState {
    pub fn name(&self) -> &'static str {
        match self {
            SequenceState::Idle => "Idle",
            SequenceState::CheckingContext => "CheckingContext",
            SequenceState::CheckingDuplicate(_) => "CheckingDuplicate",
            SequenceState::OpeningMenu(_) => "OpeningMenu",
            SequenceState::SelectingBlock(_) => "SelectingBlock",
            SequenceState::ConfirmingBlock(_) => "ConfirmingBlock",
            SequenceState::Persisting(_) => "Persisting",
            SequenceState::Done(_) => "Done",
        }
    }
}

/// Admits one sequence at a time; later triggers are rejected, not queued
#[derive(Debug, Default)]
pub struct SequenceGate {
    busy: Cell<bool>,
}

pub struct GateGuard<'a> {
    gate: &'a SequenceGate,
}

impl SequenceGate {
    pub fn try_enter(&self) -> Option<GateGuard<'_>> {
        if self.busy.replace(true) {
            None
        } else {
            Some(GateGuard { gate: self })
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.gate.busy.set(false);
    }
}

pub struct BlockSequencer<'a, P, S, T: ?Sized> {
    page: &'a P,
    registry: &'a BlockRegistry<S>,
    timer: &'a T,
    gate: &'a SequenceGate,
    locator: Locator,
    driver: ActionDriver,
    config: SequencerConfig,
}

impl<'a, P, S, T> BlockSequencer<'a, P, S, T>
where
    P: PageDom,
    S: BlockStore,
    T: Timer + ?Sized,
{
    pub fn new(
        page: &'a P,
        registry: &'a BlockRegistry<S>,
        timer: &'a T,
        gate: &'a SequenceGate,
        config: SequencerConfig,
    ) -> Self {
        BlockSequencer {
            page,
            registry,
            timer,
            gate,
            locator: Locator::new(config.locator.clone()),
            driver: ActionDriver::new(),
            config,
        }
    }

    /// Run from `Idle` to `Done`
    pub async fn run(&self) -> SequenceResult {
        let Some(_guard) = self.gate.try_enter() else {
            log::warn!("block sequence already in flight, rejecting trigger");
            return SequenceResult::Busy;
        };

        let mut state = SequenceState::Idle;
        loop {
            if let SequenceState::Done(result) = state {
                log::info!("block sequence finished: {:?}", result);
                return result;
            }
            let from = state.name();
            state = self.advance(state).await;
            log::debug!("block sequence: {} -> {}", from, state.name());
        }
    }

    /// One transition
    pub(crate) async fn advance(&self, state: SequenceState) -> SequenceState {
        use SequenceState::*;

        match state {
            Idle => CheckingContext,
            CheckingContext => self.check_context(),
            CheckingDuplicate(identity) => self.check_duplicate(identity).await,
            OpeningMenu(identity) => match self.perform(Step::OverflowMenu).await {
                Ok(()) => {
                    self.settle(self.config.settle).await;
                    SelectingBlock(identity)
                }
                Err(step) => Done(SequenceResult::StepFailed {
                    step,
                    handle: identity.handle,
                }),
            },
            SelectingBlock(identity) => match self.perform(Step::BlockMenuItem).await {
                Ok(()) => {
                    self.settle(self.config.settle).await;
                    ConfirmingBlock(identity)
                }
                Err(step) => self.abandon(step, identity),
            },
            ConfirmingBlock(identity) => match self.perform(Step::ConfirmButton).await {
                Ok(()) => {
                    self.settle(self.config.final_settle).await;
                    Persisting(identity)
                }
                Err(step) => self.abandon(step, identity),
            },
            Persisting(identity) => self.persist(identity).await,
            Done(result) => Done(result),
        }
    }

    fn check_context(&self) -> SequenceState {
        let url = self.page.current_url();
        if !handle::is_profile_page(&url) {
            return SequenceState::Done(SequenceResult::NotOnTargetPage);
        }
        // The page may navigate between the two reads
        match profile::read_identity(self.page) {
            Some(identity) => SequenceState::CheckingDuplicate(identity),
            None => SequenceState::Done(SequenceResult::IdentityNotFound),
        }
    }

    async fn check_duplicate(&self, identity: ProfileIdentity) -> SequenceState {
        match self.registry.find(identity.handle.as_str()).await {
            Ok(Some(existing)) => {
                SequenceState::Done(SequenceResult::AlreadyBlocked(existing.handle))
            }
            Ok(None) => SequenceState::OpeningMenu(identity),
            Err(e) => {
                log::error!("could not read block list: {}", e);
                SequenceState::Done(SequenceResult::PersistenceFailed {
                    handle: identity.handle,
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Locate and click one control
    async fn perform(&self, step: Step) -> Result<(), Step> {
        let Some(element) = self
            .locator
            .wait_for(self.page, self.timer, step, &self.config.wait)
            .await
        else {
            return Err(step);
        };

        self.driver.click(self.page, &element).map(|_| ()).map_err(|e| {
            log::warn!("{} could not be clicked: {}", step, e);
            step
        })
    }

    /// Close the menu or dialog opened by earlier steps
    fn abandon(&self, step: Step, identity: ProfileIdentity) -> SequenceState {
        self.page.dismiss_overlays();
        SequenceState::Done(SequenceResult::StepFailed {
            step,
            handle: identity.handle,
        })
    }

    async fn settle(&self, jitter: Jitter) {
        self.timer.sleep(jitter.sample()).await;
    }

    async fn persist(&self, identity: ProfileIdentity) -> SequenceState {
        let handle = identity.handle.clone();
        let account = identity.into_account(Utc::now());

        SequenceState::Done(match self.registry.add(account).await {
            Ok(saved) => SequenceResult::Blocked(saved.handle),
            Err(StoreError::Duplicate(_)) => SequenceResult::AlreadyBlocked(handle),
            Err(e) => {
                log::error!("blocked {} on the page but could not save it: {}", handle, e);
                SequenceResult::PersistenceFailed {
                    handle,
                    reason: e.to_string(),
                }
            }
        })
    }
}
